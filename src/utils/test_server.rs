//! One-shot http server for exercising the api clients against a real socket.

use anyhow::{anyhow, Context, Result};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

/// What the client sent.
#[derive(Debug)]
pub struct RecordedRequest {
    pub request_line: String,
    headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Accepts a single connection, answers it with `status` and `body`, and hands back the
/// request. Returns the base url to point a client at.
pub async fn serve_once(
    status: u16,
    body: &'static str,
) -> Result<(String, JoinHandle<Result<RecordedRequest>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let read = socket.read(&mut chunk).await?;
            if read == 0 {
                return Err(anyhow!("Connection closed before headers ended"));
            }
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(position) = buffer.windows(4).position(|v| v == b"\r\n\r\n") {
                break position;
            }
        };

        let head = String::from_utf8(buffer[..head_end].to_vec())?;
        let mut lines = head.split("\r\n");
        let request_line = lines.next().context("Empty request")?.to_string();
        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect::<Vec<_>>();

        let content_length = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
            .map(|(_, value)| value.parse::<usize>())
            .transpose()?
            .unwrap_or(0);
        let body_start = head_end + 4;
        while buffer.len() < body_start + content_length {
            let read = socket.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
        }
        let request_body = String::from_utf8(buffer[body_start..].to_vec())?;

        let response = format!(
            "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        Ok(RecordedRequest {
            request_line,
            headers,
            body: request_body,
        })
    });

    Ok((base_url, handle))
}
