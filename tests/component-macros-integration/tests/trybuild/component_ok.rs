use component_macros::Component;
use infrastructure_common::{Component, Slot, Stereotype};

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Default, Component)]
#[component(service, name = "system_clock")]
#[provides(dyn Clock)]
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        0
    }
}

#[derive(Default, Component)]
struct Scheduler {
    #[inject]
    clock: Slot<dyn Clock>,
    ticks: u64,
}

fn main() {
    let clock = SystemClock::component_type();
    assert_eq!(clock.name(), "system_clock");
    assert!(clock.has_stereotype(Stereotype::Service));

    let scheduler = Scheduler::component_type();
    assert_eq!(scheduler.slots().len(), 1);
    assert_eq!(Scheduler::default().ticks, 0);
    assert!(!Scheduler::default().clock.is_filled());
}
