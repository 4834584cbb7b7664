//! Clock and delay abstraction driving the transmission scheduler.

/// Monotonic clock plus asynchronous delay.
pub trait GatewayTimer {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;

    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u64) -> impl core::future::Future<Output = ()> + 'a;
}
