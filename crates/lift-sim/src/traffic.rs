//! The `TrafficGenerator` boundary and its two built-in generators.

use std::collections::VecDeque;

use lift_core::{FloorId, SimRng, Tick};

/// One origin→destination travel request emitted by a traffic generator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TravelRequest {
    pub arrival_floor: FloorId,
    pub destination_floor: FloorId,
}

/// The passenger-arrival boundary.
///
/// Called exactly once per tick with the current tick; returns the requests
/// arriving at that tick.  Implementations own their randomness (seeded,
/// never global), so a run is replayable from its seed alone.
pub trait TrafficGenerator {
    fn arrivals(&mut self, tick: Tick) -> Vec<TravelRequest>;
}

// ── ScriptedTraffic ───────────────────────────────────────────────────────────

/// Replays a fixed `(tick, request)` script.
///
/// The workhorse of the test suite, and the replay half of a recorded
/// arrival trace.
pub struct ScriptedTraffic {
    script: VecDeque<(Tick, TravelRequest)>,
}

impl ScriptedTraffic {
    /// Build from an arrival list.  Entries are sorted by tick; the sort is
    /// stable, so same-tick entries keep their given order.
    pub fn new(mut script: Vec<(Tick, TravelRequest)>) -> Self {
        script.sort_by_key(|&(tick, _)| tick);
        Self {
            script: script.into(),
        }
    }

    /// A script with no arrivals at all.
    pub fn empty() -> Self {
        Self {
            script: VecDeque::new(),
        }
    }
}

impl TrafficGenerator for ScriptedTraffic {
    fn arrivals(&mut self, tick: Tick) -> Vec<TravelRequest> {
        let mut out = Vec::new();
        while let Some(&(at, request)) = self.script.front() {
            if at > tick {
                break;
            }
            self.script.pop_front();
            out.push(request);
        }
        out
    }
}

// ── PoissonTraffic ────────────────────────────────────────────────────────────

/// Seeded Poisson arrival process with a lobby bias.
///
/// Arrivals come from per-tick Bernoulli thinning of the mean rate: at most
/// one request per tick, with probability `arrivals_per_sec * dt`.  At the
/// tick resolutions the engine runs at this is an accurate Poisson
/// approximation, and the constant draw count per tick keeps the stream
/// replayable by seed alone.
///
/// `lobby_fraction` of requests start at floor 0 (up-peak style); the rest
/// travel between two distinct uniformly drawn floors.
pub struct PoissonTraffic {
    rng: SimRng,
    num_floors: u32,
    arrival_probability: f64,
    lobby_fraction: f64,
}

impl PoissonTraffic {
    /// `num_floors` must match the building (and be at least 2).
    pub fn new(
        rng: SimRng,
        num_floors: u32,
        arrivals_per_sec: f64,
        tick_duration_secs: f64,
        lobby_fraction: f64,
    ) -> Self {
        Self {
            rng,
            num_floors,
            arrival_probability: (arrivals_per_sec * tick_duration_secs).clamp(0.0, 1.0),
            lobby_fraction: lobby_fraction.clamp(0.0, 1.0),
        }
    }

    fn random_request(&mut self) -> TravelRequest {
        if self.rng.gen_bool(self.lobby_fraction) {
            let destination = self.rng.gen_range(1..self.num_floors);
            return TravelRequest {
                arrival_floor: FloorId(0),
                destination_floor: FloorId(destination),
            };
        }
        // Distinct pair: the destination is a non-zero offset from the
        // arrival floor, modulo the floor count.
        let arrival = self.rng.gen_range(0..self.num_floors);
        let offset = self.rng.gen_range(1..self.num_floors);
        TravelRequest {
            arrival_floor: FloorId(arrival),
            destination_floor: FloorId((arrival + offset) % self.num_floors),
        }
    }
}

impl TrafficGenerator for PoissonTraffic {
    fn arrivals(&mut self, _tick: Tick) -> Vec<TravelRequest> {
        if self.rng.gen_bool(self.arrival_probability) {
            vec![self.random_request()]
        } else {
            Vec::new()
        }
    }
}
