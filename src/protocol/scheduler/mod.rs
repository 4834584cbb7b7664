//! Multi-rate transmission service.
//!
//! [`GatewayService`] assembles the registry, the static identity, the
//! telemetry provider, the bus and the timer. It splits into:
//!
//! * an optional [`GatewayHandle`] to queue on-demand transmissions and stop
//!   the loop;
//! * a [`GatewayRunner`] that drives one timer per distinct period.
//!
//! The command channel is provided by the caller as an
//! [`embassy_sync::channel::Channel`]. Without one the runner has no way to
//! be stopped and runs until its future is dropped.
//!
//! Within a cycle kinds are processed in registry order. Encode and transmit
//! failures are contained per kind: they are logged, counted, and the next
//! kind runs.
use core::fmt::Debug;

use embassy_sync::{
    blocking_mutex::raw::NoopRawMutex,
    channel::{Channel, Sender},
};
use futures_util::{future::select, future::Either, pin_mut};
use log::{debug, info, warn};

use crate::core::StaticIdentity;
use crate::error::{GatewayError, RegistryError};
use crate::protocol::messages::MessageKind;
use crate::protocol::registry::MessageRegistry;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{can_bus::CanBus, gateway_timer::GatewayTimer};
use crate::telemetry::TelemetrySource;

pub mod schedule;

pub use schedule::Schedule;

/// Command channel shared between a [`GatewayHandle`] and its runner.
pub type CommandChannel<const CMD_CAP: usize> = Channel<NoopRawMutex, GatewayCommand, CMD_CAP>;

//==================================================================================SERVICE
/// Service assembling the gateway components.
pub struct GatewayService<'a, C, T, S, const CMD_CAP: usize>
where
    C: CanBus,
    T: GatewayTimer,
    S: TelemetrySource,
{
    runner: GatewayRunner<'a, C, T, S, CMD_CAP>,
}

impl<'a, C, T, S, const CMD_CAP: usize> GatewayService<'a, C, T, S, CMD_CAP>
where
    C: CanBus,
    C::Error: Debug,
    T: GatewayTimer,
    S: TelemetrySource,
{
    /// Wrap an already-built registry.
    pub fn new(
        registry: MessageRegistry,
        identity: StaticIdentity,
        telemetry: S,
        bus: C,
        timer: T,
        command_channel: Option<&'a CommandChannel<CMD_CAP>>,
    ) -> Self {
        Self {
            runner: GatewayRunner {
                registry,
                identity,
                telemetry,
                bus,
                timer,
                command_channel,
                summary: RunSummary::default(),
            },
        }
    }

    /// Convenience helper: register the full catalog for `identity`, then
    /// build the service.
    pub fn with_catalog(
        identity: StaticIdentity,
        telemetry: S,
        bus: C,
        timer: T,
        command_channel: Option<&'a CommandChannel<CMD_CAP>>,
    ) -> Result<Self, RegistryError> {
        let registry = MessageRegistry::new(&identity)?;
        Ok(Self::new(
            registry,
            identity,
            telemetry,
            bus,
            timer,
            command_channel,
        ))
    }

    /// Split into handle/runner components.
    pub fn into_parts(self) -> GatewayParts<'a, C, T, S, CMD_CAP> {
        let handle = self.runner.command_channel.map(|channel| GatewayHandle {
            sender: channel.sender(),
        });
        GatewayParts {
            handle,
            runner: self.runner,
        }
    }
}

/// Bundle returned by [`GatewayService::into_parts`].
pub struct GatewayParts<'a, C, T, S, const CMD_CAP: usize>
where
    C: CanBus,
    T: GatewayTimer,
    S: TelemetrySource,
{
    pub handle: Option<GatewayHandle<'a, CMD_CAP>>,
    pub runner: GatewayRunner<'a, C, T, S, CMD_CAP>,
}

//==================================================================================REPORTS
/// Outcome of one firing of a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub period_ms: u32,
    pub frames_sent: usize,
    pub encode_failures: usize,
    pub transmit_failures: usize,
}

/// Totals accumulated by a runner since it was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub frames_sent: u64,
    pub encode_failures: u64,
    pub transmit_failures: u64,
    /// On-demand requests naming no registered kind.
    pub unknown_requests: u64,
}

//==================================================================================RUNNER
/// Runner that drives the transmission loop.
pub struct GatewayRunner<'a, C, T, S, const CMD_CAP: usize>
where
    C: CanBus,
    T: GatewayTimer,
    S: TelemetrySource,
{
    registry: MessageRegistry,
    identity: StaticIdentity,
    telemetry: S,
    bus: C,
    timer: T,
    command_channel: Option<&'a CommandChannel<CMD_CAP>>,
    summary: RunSummary,
}

impl<'a, C, T, S, const CMD_CAP: usize> GatewayRunner<'a, C, T, S, CMD_CAP>
where
    C: CanBus,
    C::Error: Debug,
    T: GatewayTimer,
    S: TelemetrySource,
{
    /// Run the timer loop until a [`GatewayCommand::Shutdown`] is received.
    ///
    /// Returns immediately when there is neither a period to schedule nor a
    /// command channel to listen on.
    pub async fn drive(&mut self) -> RunSummary {
        let command_channel = self.command_channel;
        let mut schedule = Schedule::new(&self.registry.periods(), self.timer.now_ms());
        info!(
            "Gateway running: {} message kind(s), periods {:?} ms",
            self.registry.len(),
            self.registry.periods()
        );

        loop {
            let now = self.timer.now_ms();
            for period in schedule.take_due(now) {
                self.run_cycle(period).await;
            }

            let wait = schedule
                .next_deadline()
                .map(|deadline| deadline.saturating_sub(self.timer.now_ms()));
            let command = match (wait, command_channel) {
                (None, None) => {
                    info!("Nothing to schedule and no command channel, stopping");
                    break;
                }
                (Some(wait), None) => {
                    self.timer.delay_ms(wait).await;
                    None
                }
                (None, Some(channel)) => Some(channel.receive().await),
                (Some(wait), Some(channel)) => {
                    let delay = self.timer.delay_ms(wait);
                    let receive = channel.receive();
                    pin_mut!(delay);
                    pin_mut!(receive);

                    match select(delay, receive).await {
                        Either::Left(((), _pending_receive)) => None,
                        Either::Right((command, _pending_delay)) => Some(command),
                    }
                }
            };

            if let Some(command) = command {
                if !self.handle_command(command).await {
                    break;
                }
            }
        }

        info!("Gateway stopped: {:?}", self.summary);
        self.summary
    }

    /// Fire every kind registered with `period_ms`: refresh telemetry, then
    /// encode and transmit each kind in registry order.
    pub async fn run_cycle(&mut self, period_ms: u32) -> CycleReport {
        if let Err(err) = self.telemetry.refresh() {
            warn!("Telemetry refresh failed, using previous snapshot: {}", err);
        }

        let mut report = CycleReport {
            period_ms,
            ..CycleReport::default()
        };
        for kind in self.registry.get_definitions_by_period(period_ms) {
            match self.transmit(kind).await {
                Ok(()) => report.frames_sent += 1,
                Err(GatewayError::Encode { .. }) => report.encode_failures += 1,
                Err(GatewayError::Transmit { .. }) => report.transmit_failures += 1,
                Err(_) => {}
            }
        }

        self.summary.cycles += 1;
        debug!("{} ms cycle: {:?}", period_ms, report);
        report
    }

    /// Encode and transmit `kind` immediately, whatever its period.
    pub async fn transmit_now(&mut self, kind: MessageKind) -> Result<(), GatewayError<C::Error>> {
        self.transmit(kind).await
    }

    /// Same as [`transmit_now`](Self::transmit_now), looking the kind up by
    /// protocol name.
    pub async fn transmit_by_name(&mut self, name: &str) -> Result<(), GatewayError<C::Error>> {
        match MessageKind::from_name(name) {
            Some(kind) => self.transmit(kind).await,
            None => {
                self.summary.unknown_requests += 1;
                warn!("Request for unknown message kind {:?} ignored", name);
                Err(GatewayError::UnknownMessageKind {
                    name: name.to_owned(),
                })
            }
        }
    }

    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    pub fn identity(&self) -> &StaticIdentity {
        &self.identity
    }

    pub fn bus(&self) -> &C {
        &self.bus
    }

    pub fn telemetry_mut(&mut self) -> &mut S {
        &mut self.telemetry
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Returns `false` once the loop must stop.
    async fn handle_command(&mut self, command: GatewayCommand) -> bool {
        match command {
            GatewayCommand::Transmit(kind) => {
                let _ = self.transmit(kind).await;
                true
            }
            GatewayCommand::TransmitNamed(name) => {
                let _ = self.transmit_by_name(&name).await;
                true
            }
            GatewayCommand::Shutdown => {
                info!("Shutdown requested");
                false
            }
        }
    }

    /// Per-kind boundary: every failure is logged and counted here and never
    /// reaches the rest of the cycle.
    async fn transmit(&mut self, kind: MessageKind) -> Result<(), GatewayError<C::Error>> {
        let result = self.encode_and_send(kind).await;
        match &result {
            Ok(()) => self.summary.frames_sent += 1,
            Err(err) => {
                match err {
                    GatewayError::Encode { .. } => self.summary.encode_failures += 1,
                    GatewayError::Transmit { .. } => self.summary.transmit_failures += 1,
                    GatewayError::UnknownMessageKind { .. } | GatewayError::Registry(_) => {}
                }
                warn!("{}", err);
            }
        }
        result
    }

    async fn encode_and_send(&mut self, kind: MessageKind) -> Result<(), GatewayError<C::Error>> {
        let arbitration_id = self.registry.get_arbitration_id(kind)?;

        let payload = match kind.encode(&self.telemetry, &self.identity) {
            Ok(payload) => payload,
            Err(source) => {
                self.registry.clear_payload(kind)?;
                return Err(GatewayError::Encode {
                    kind: kind.name(),
                    source,
                });
            }
        };
        self.registry.set_payload(kind, payload)?;

        let frame = CanFrame::from_payload(arbitration_id, &payload);
        self.bus
            .send(&frame)
            .await
            .map_err(|error| GatewayError::Transmit {
                kind: kind.name(),
                error,
            })?;
        debug!("{} {} [{}]", kind, arbitration_id, payload);
        Ok(())
    }
}

//==================================================================================HANDLE
/// Transmission handle (optional).
pub struct GatewayHandle<'a, const CMD_CAP: usize> {
    sender: Sender<'a, NoopRawMutex, GatewayCommand, CMD_CAP>,
}

impl<'a, const CMD_CAP: usize> GatewayHandle<'a, CMD_CAP> {
    /// Queue an immediate transmission of `kind`.
    pub async fn request(&self, kind: MessageKind) {
        self.sender.send(GatewayCommand::Transmit(kind)).await;
    }

    /// Queue an immediate transmission by protocol name, e.g. `"DM_RV"`.
    /// Unknown names are reported by the runner.
    pub async fn request_named(&self, name: &str) {
        self.sender
            .send(GatewayCommand::TransmitNamed(name.to_owned()))
            .await;
    }

    /// Ask the runner to stop after the current cycle.
    pub async fn shutdown(&self) {
        self.sender.send(GatewayCommand::Shutdown).await;
    }

    /// Non-blocking variant of [`shutdown`](Self::shutdown). Returns `false`
    /// when the channel is full.
    pub fn try_shutdown(&self) -> bool {
        self.sender.try_send(GatewayCommand::Shutdown).is_ok()
    }
}

/// Commands queued by producer tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCommand {
    Transmit(MessageKind),
    TransmitNamed(String),
    Shutdown,
}
