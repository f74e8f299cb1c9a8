use tokio::time::Instant;

pub struct TracingContext {
    pub operation: &'static str,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
