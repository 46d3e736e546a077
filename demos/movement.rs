//! Movement Example
//!
//! A walker that stands, walks and runs. Walking is only allowed once the
//! walker has rested, and every applied transition is reported through the
//! host hook.
//!
//! Run with `RUST_LOG=statewise=debug` to see the library's own logging.

use statewise::{identifier_enum, Definition, Guard, GuardSpec, Host, Machine, Symbol};
use tracing_subscriber::EnvFilter;

identifier_enum! {
    enum Pose {
        Standing => standing,
        Walking => walking,
        Running => running,
    }
}

identifier_enum! {
    enum Move {
        Walk => walk,
        Run => run,
        Hold => hold,
    }
}

struct Walker {
    name: &'static str,
    rested: bool,
}

impl Walker {
    fn on_walk(&self) {
        println!("  {} starts walking", self.name);
    }

    fn on_run(&self, from: &Symbol) {
        println!("  {} breaks into a run from {}", self.name, from);
    }

    fn on_hold(&self) {
        println!("  {} stops", self.name);
    }
}

impl Host for Walker {
    fn state_changed(&mut self, event: &Symbol, from: &Symbol, to: &Symbol) {
        println!("{event}: {from} -> {to}");
        match event.as_str() {
            "walk" => self.on_walk(),
            "run" => self.on_run(from),
            "hold" => self.on_hold(),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Movement Example ===\n");

    let definition = Definition::builder()
        .method("rested", Guard::new(|w: &Walker| w.rested))?
        .initial(Pose::Standing)?
        .state(Pose::Walking)?
        .state(Pose::Running)?
        .event(Move::Walk, |e| {
            e.transition_when(Pose::Standing, Pose::Walking, GuardSpec::method("rested"))
        })?
        .event(Move::Run, |e| {
            e.transitions([Pose::Standing, Pose::Walking], Pose::Running)
        })?
        .event(Move::Hold, |e| {
            e.transitions([Pose::Walking, Pose::Running], Pose::Standing)
        })?
        .build();

    let mut walker = Machine::new(
        definition,
        Walker {
            name: "Ada",
            rested: false,
        },
    )?;

    println!("Initial state: {}", walker.state());
    println!("Can walk while tired? {}\n", walker.can_fire(Move::Walk)?);

    if let Err(e) = walker.fire(Move::Walk) {
        println!("walk refused: {e}\n");
    }

    walker.host_mut().rested = true;
    for event in [Move::Walk, Move::Run, Move::Hold, Move::Run, Move::Hold] {
        walker.fire(event)?;
    }

    println!("\nPath:");
    for state in walker.history().get_path() {
        println!("  {state}");
    }
    println!("Available now: {:?}", walker.available_events()?);

    Ok(())
}
