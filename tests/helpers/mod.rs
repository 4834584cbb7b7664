/// Test doubles to simulate the CAN bus, the clock and the BMS during integration tests.
use rvc_gateway::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, gateway_timer::GatewayTimer},
};
use rvc_gateway::telemetry::{paths, MapTelemetry};
use tokio::sync::mpsc;

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory CAN bus forwarding every accepted frame to the test.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    failing_dgns: Vec<u32>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Bus plus the receiving end the test reads frames from.
    pub fn create() -> (Self, mpsc::UnboundedReceiver<CanFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bus = Self {
            tx,
            failing_dgns: Vec::new(),
        };
        (bus, rx)
    }

    /// Refuse every frame carrying `dgn`.
    pub fn failing_on(mut self, dgn: u32) -> Self {
        self.failing_dgns.push(dgn);
        self
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        if self.failing_dgns.contains(&frame.id.dgn()) {
            return Err(());
        }
        self.tx.send(frame.clone()).map_err(|_| ())?;
        Ok(())
    }
}

#[allow(dead_code)]
/// Everything sent so far, in transmission order.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<CanFrame>) -> Vec<CanFrame> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[allow(dead_code)]
/// Simulated clock: every delay completes instantly and moves time forward,
/// until `horizon_ms` is reached. Past the horizon delays never complete.
pub struct VirtualTimer {
    now: u64,
    horizon_ms: u64,
}

#[allow(dead_code)]
impl VirtualTimer {
    pub fn new(horizon_ms: u64) -> Self {
        Self { now: 0, horizon_ms }
    }
}

impl GatewayTimer for VirtualTimer {
    fn now_ms(&self) -> u64 {
        self.now
    }

    async fn delay_ms(&mut self, millis: u64) {
        let target = self.now + millis;
        if target > self.horizon_ms {
            std::future::pending::<()>().await;
        }
        self.now = target;
    }
}

#[allow(dead_code)]
/// Complete, healthy battery snapshot.
pub fn battery_snapshot() -> MapTelemetry {
    MapTelemetry::new()
        .with(paths::DC_VOLTAGE, 13.2)
        .with(paths::DC_CURRENT, 10.0)
        .with(paths::DC_POWER, -132.4)
        .with(paths::DC_TEMPERATURE, 25.0)
        .with(paths::SOC, 87.5)
        .with(paths::CAPACITY, 50.0)
        .with(paths::INSTALLED_CAPACITY, 100.0)
        .with(paths::MAX_CHARGE_VOLTAGE, 14.2)
        .with(paths::MAX_CHARGE_CURRENT, 50.0)
        .with(paths::MODULES_ONLINE, 4.0)
        .with(paths::ALARM_HIGH_VOLTAGE, 0.0)
        .with(paths::ALARM_LOW_VOLTAGE, 0.0)
        .with(paths::ALARM_LOW_SOC, 0.0)
        .with(paths::ALARM_LOW_TEMPERATURE, 0.0)
        .with(paths::ALARM_HIGH_TEMPERATURE, 0.0)
}

#[allow(dead_code)]
/// Number of frames carrying `dgn`.
pub fn count_dgn(frames: &[CanFrame], dgn: u32) -> usize {
    frames.iter().filter(|frame| frame.id.dgn() == dgn).count()
}
