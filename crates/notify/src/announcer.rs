//! One scheduler tick: sample the clock, check the gate, maybe announce.
//!
//! [`WeeklyAnnouncer`] keeps no state between ticks. Whether a message goes out
//! depends only on the local time sampled at the start of the tick, so the
//! caller (cron, a CI schedule, systemd timer) owns retry and alerting.

use chrono::NaiveDate;
use tracing::{debug, info};

use weekroster_core::gate::{compose_announcement, should_fire_now};
use weekroster_core::{
    Announcement, LocalInstant, RotationConfig, RotationLabels, SendTime, TimeSource,
};

use crate::traits::{Notifier, NotifyError};

/// What a tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not the send minute; the transport was never built.
    Skipped { local: LocalInstant },
    /// The gate fired and the transport accepted the message.
    Sent(Announcement),
}

/// Gate, rotation lookup and delivery bundled for the weekly announcement.
#[derive(Debug, Clone)]
pub struct WeeklyAnnouncer {
    anchor: NaiveDate,
    labels: RotationLabels,
    send_time: SendTime,
    product_name: String,
}

impl WeeklyAnnouncer {
    pub fn new(
        anchor: NaiveDate,
        labels: RotationLabels,
        send_time: SendTime,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            anchor,
            labels,
            send_time,
            product_name: product_name.into(),
        }
    }

    pub fn from_config(config: &RotationConfig) -> Self {
        Self::new(
            config.anchor,
            config.labels.clone(),
            config.send_time,
            config.product_name.clone(),
        )
    }

    /// The announcement due at `local`, if the gate fires there.
    pub fn check(&self, local: &LocalInstant) -> Result<Option<Announcement>, NotifyError> {
        if !should_fire_now(local, self.send_time) {
            return Ok(None);
        }
        self.compose(local.date).map(Some)
    }

    fn compose(&self, today: NaiveDate) -> Result<Announcement, NotifyError> {
        compose_announcement(&self.product_name, &self.labels, self.anchor, today)
            .ok_or(NotifyError::DateOutOfRange(today))
    }

    /// Run one tick.
    ///
    /// `connect` builds the transport and is only called once the gate has
    /// fired, so a missing secret is harmless on the many idle ticks. Any
    /// transport error is returned unchanged.
    pub async fn tick<F, N>(
        &self,
        time: &dyn TimeSource,
        connect: F,
    ) -> Result<TickOutcome, NotifyError>
    where
        F: FnOnce() -> Result<N, NotifyError>,
        N: Notifier,
    {
        let local = time.local_now();
        let Some(announcement) = self.check(&local)? else {
            debug!(%local, send_time = %self.send_time, "not the send window, skipping");
            return Ok(TickOutcome::Skipped { local });
        };

        self.deliver(announcement, connect).await.map(TickOutcome::Sent)
    }

    /// Send the announcement for the sampled local date without consulting
    /// the gate. Used to re-send by hand after a missed window.
    pub async fn announce_now<F, N>(
        &self,
        time: &dyn TimeSource,
        connect: F,
    ) -> Result<Announcement, NotifyError>
    where
        F: FnOnce() -> Result<N, NotifyError>,
        N: Notifier,
    {
        let local = time.local_now();
        self.deliver(self.compose(local.date)?, connect).await
    }

    async fn deliver<F, N>(
        &self,
        announcement: Announcement,
        connect: F,
    ) -> Result<Announcement, NotifyError>
    where
        F: FnOnce() -> Result<N, NotifyError>,
        N: Notifier,
    {
        let notifier = connect()?;
        notifier.send(&announcement.text).await?;
        info!(
            channel = notifier.channel_name(),
            target = %announcement.target,
            week = %announcement.index,
            label = %announcement.label,
            "announcement sent"
        );
        Ok(announcement)
    }
}
