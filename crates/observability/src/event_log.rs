use campkitchen_events::{Event, EventBus, Subscription};

/// Bus decorator: logs each event at `info` before handing it to the inner bus.
#[derive(Debug, Clone, Default)]
pub struct TracingEventBus<B> {
    inner: B,
}

impl<B> TracingEventBus<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<M, B> EventBus<M> for TracingEventBus<B>
where
    M: Event,
    B: EventBus<M>,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        tracing::info!(
            event_type = message.event_type(),
            version = message.version(),
            occurred_at = %message.occurred_at(),
            "event published"
        );
        self.inner.publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campkitchen_events::InMemoryEventBus;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(DateTime<Utc>);

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn events_pass_through_to_inner_bus() {
        let bus = TracingEventBus::new(InMemoryEventBus::new());
        let sub = bus.subscribe();

        let ping = Ping(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
        bus.publish(ping.clone()).unwrap();

        assert_eq!(sub.drain(), vec![ping]);
    }
}
