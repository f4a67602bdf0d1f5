pub mod logging;
pub mod percentage;
pub mod runtime;
#[cfg(test)]
pub mod test_server;
