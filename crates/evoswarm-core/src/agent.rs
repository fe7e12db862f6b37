//! Agent — a genome-steered point on the toroidal plane.
//!
//! Each tick an agent picks a heading from the neighbors it registered
//! during the previous proximity pass, steps one unit along it, wraps
//! around the canvas edges and earns one point of fitness. The proximity
//! pass that follows rebuilds its neighbor list and charges a penalty for
//! every physical overlap.
//!
//! Agents never hold references to each other. Neighbors are indices into
//! the population, resolved against a frozen [`Presence`] view that the
//! owning simulation builds before each pass.

use crate::genome::{Genome, ReproductionParams};
use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Heading used when the initial velocity has no direction.
const FALLBACK_DIRECTION: Vector2 = Vector2 { x: 1.0, y: 0.0 };

/// Fitness earned for every tick survived.
const SURVIVAL_REWARD: f64 = 1.0;

/// Multiplier on overlap depth when charging a collision.
const OVERLAP_PENALTY: f64 = 2.0;

/// Frozen view of one agent, shared with the rest of the population
/// during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub id: AgentId,
    pub position: Vector2,
    pub direction: Vector2,
}

/// A neighbor as seen by the steering rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborReading {
    /// Distance from the steering agent.
    pub distance: f64,
    /// The neighbor's current heading.
    pub direction: Vector2,
}

/// A point agent steered by its genome.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    direction: Vector2,
    genome: Genome,
    fitness: f64,
    radius: f64,
    sensing_radius: f64,
    /// Population indices registered during the last proximity pass.
    neighbors: Vec<usize>,
    state: DisplayState,
}

impl Agent {
    /// Create an agent with explicit kinematics.
    ///
    /// The heading starts along `velocity`, or along +x when the velocity
    /// is zero.
    pub fn new(
        id: AgentId,
        position: Vector2,
        velocity: Vector2,
        genome: Genome,
        radius: f64,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vector2::ZERO,
            direction: velocity.normalize().unwrap_or(FALLBACK_DIRECTION),
            sensing_radius: genome.sensing_radius(),
            genome,
            fitness: 0.0,
            radius,
            neighbors: Vec::new(),
            state: DisplayState::Initial,
        }
    }

    /// Create a founder agent at a random spot on a `width` × `height` canvas.
    pub fn spawn<R: Rng + ?Sized>(
        id: AgentId,
        rng: &mut R,
        width: f64,
        height: f64,
        radius: f64,
        sensing_radius: f64,
    ) -> Self {
        let position = Vector2::new(
            wrap_coordinate(rng.random::<f64>() * width, width),
            wrap_coordinate(rng.random::<f64>() * height, height),
        );
        let velocity = Vector2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let genome = Genome::founder(rng, sensing_radius);
        Self::new(id, position, velocity, genome, radius)
    }

    pub fn with_acceleration(mut self, acceleration: Vector2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_direction(mut self, direction: Vector2) -> Self {
        self.set_direction(direction);
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn sensing_radius(&self) -> f64 {
        self.sensing_radius
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn presence(&self) -> Presence {
        Presence {
            id: self.id,
            position: self.position,
            direction: self.direction,
        }
    }

    /// Normalize `candidate` and adopt it as the heading.
    ///
    /// A zero-length candidate leaves the current heading in place and
    /// returns `false`.
    pub fn set_direction(&mut self, candidate: Vector2) -> bool {
        match candidate.normalize() {
            Ok(unit) => {
                self.direction = unit;
                true
            }
            Err(_) => false,
        }
    }

    /// Steering policy.
    ///
    /// Alone, the agent blends its acceleration and velocity through genes
    /// 0–3. With neighbors, it sums, per neighbor, a blend of its own and
    /// the neighbor's heading (genes 4–7) scaled by gene 8 and the signed
    /// gap `distance - radius`, so the same weights attract or repel
    /// depending on which side of contact the neighbor sits.
    pub fn decide_direction(&mut self, neighbors: &[NeighborReading]) {
        let g = self.genome.genes();
        let candidate = if neighbors.is_empty() {
            Vector2::new(
                self.acceleration.x * g[0] + self.velocity.x * g[1],
                self.acceleration.y * g[2] + self.velocity.y * g[3],
            )
        } else {
            neighbors.iter().fold(Vector2::ZERO, |acc, n| {
                let gap = g[8] * (n.distance - self.radius);
                acc.plus(&Vector2::new(
                    (self.direction.x * g[4] + n.direction.x * g[5]) * gap,
                    (self.direction.y * g[6] + n.direction.y * g[7]) * gap,
                ))
            })
        };
        self.set_direction(candidate);
    }

    /// Advance one tick against a frozen view of the population.
    ///
    /// Steering reads the neighbors gathered by the previous proximity
    /// pass; the list is emptied afterwards so the next pass starts fresh.
    pub fn update(&mut self, population: &[Presence], width: f64, height: f64) {
        self.state = DisplayState::Initial;
        self.sensing_radius = self.genome.sensing_radius();

        let readings: Vec<NeighborReading> = self
            .neighbors
            .iter()
            .filter_map(|&idx| population.get(idx))
            .map(|n| NeighborReading {
                distance: self.position.distance_to(&n.position),
                direction: n.direction,
            })
            .collect();
        self.decide_direction(&readings);
        self.neighbors.clear();

        self.position.add(&self.direction);
        self.position.x = wrap_coordinate(self.position.x, width);
        self.position.y = wrap_coordinate(self.position.y, height);

        self.fitness += SURVIVAL_REWARD;
    }

    /// Check one other agent, registered at `index` in the population.
    ///
    /// Anything inside the sensing radius becomes a neighbor. Anything
    /// inside the collision radius is an overlap: the agent turns `Hit`
    /// and pays twice the overlap depth. Returns whether an overlap
    /// occurred. The caller never passes the agent's own slot.
    pub fn detect_proximity(&mut self, index: usize, other: &Presence) -> bool {
        let d = self.position.distance_to(&other.position);
        if d < self.sensing_radius {
            self.neighbors.push(index);
        }
        if d < self.radius {
            self.state = DisplayState::Hit;
            self.fitness -= (self.radius - d) * OVERLAP_PENALTY;
            return true;
        }
        false
    }

    /// Run [`detect_proximity`](Self::detect_proximity) against every slot
    /// of the population except `own_index`, the agent's own.
    ///
    /// Self is identified by slot, not by id, so two agents sharing an id
    /// still see each other. Returns whether any overlap occurred.
    pub fn detect_proximity_all(&mut self, own_index: usize, population: &[Presence]) -> bool {
        population
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != own_index)
            .fold(false, |hit, (idx, other)| self.detect_proximity(idx, other) | hit)
    }

    /// Crossover with `other_parent` and mutate, gene by gene.
    pub fn reproduce_genome<R: Rng + ?Sized>(
        &mut self,
        other_parent: &Genome,
        params: &ReproductionParams,
        rng: &mut R,
    ) {
        self.genome.reproduce(other_parent, params, rng);
    }

    /// Zero fitness and drop transient neighbor data before a new generation.
    pub fn reset_for_generation(&mut self) {
        self.fitness = 0.0;
        self.neighbors.clear();
    }

    /// Return to the `Initial` display state.
    pub fn clear_hit(&mut self) {
        self.state = DisplayState::Initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GENOME_LEN;

    fn genome(genes: [f64; GENOME_LEN]) -> Genome {
        Genome::from_slice(&genes).unwrap()
    }

    /// Lone rule follows velocity on both axes; flock rule uses unit weights.
    fn follower_genome(sensing_radius: f64) -> Genome {
        genome([0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, sensing_radius, 0.0, 0.0])
    }

    fn agent_at(seed: u64, x: f64, y: f64) -> Agent {
        Agent::new(
            AgentId::from_seed(seed),
            Vector2::new(x, y),
            Vector2::new(1.0, 0.0),
            follower_genome(30.0),
            10.0,
        )
    }

    #[test]
    fn initial_direction_follows_velocity() {
        let a = Agent::new(
            AgentId::from_seed(1),
            Vector2::ZERO,
            Vector2::new(0.0, -3.0),
            follower_genome(30.0),
            10.0,
        );
        assert_eq!(a.direction(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn zero_velocity_falls_back_to_x_axis() {
        let a = Agent::new(
            AgentId::from_seed(1),
            Vector2::ZERO,
            Vector2::ZERO,
            follower_genome(30.0),
            10.0,
        );
        assert_eq!(a.direction(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn lone_steering_blends_acceleration_and_velocity() {
        let g = genome([2.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 30.0, 0.0, 0.0]);
        let mut a =
            Agent::new(AgentId::from_seed(1), Vector2::ZERO, Vector2::new(1.0, 1.0), g, 10.0)
                .with_acceleration(Vector2::new(0.5, 7.0));
        a.decide_direction(&[]);
        // x = 0.5 * 2, y = 7 * 0 → heading +x
        assert_eq!(a.direction(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn degenerate_steering_keeps_previous_direction() {
        let g = genome([0.0; GENOME_LEN]);
        let mut a =
            Agent::new(AgentId::from_seed(1), Vector2::ZERO, Vector2::new(0.0, 1.0), g, 10.0);
        a.decide_direction(&[]);
        assert_eq!(a.direction(), Vector2::new(0.0, 1.0));
        assert!(!a.set_direction(Vector2::ZERO));
    }

    #[test]
    fn degenerate_steering_still_moves_and_wraps() {
        let g = genome([0.0; GENOME_LEN]);
        let mut a = Agent::new(
            AgentId::from_seed(1),
            Vector2::new(50.0, 99.5),
            Vector2::new(0.0, 1.0),
            g,
            10.0,
        );
        for _ in 0..3 {
            let view = [a.presence()];
            a.update(&view, 100.0, 100.0);
            assert_eq!(a.direction(), Vector2::new(0.0, 1.0));
        }
        assert_eq!(a.position().x, 50.0);
        assert!((a.position().y - 2.5).abs() < 1e-9);
        assert_eq!(a.fitness(), 3.0);
    }

    #[test]
    fn flock_steering_sign_follows_gap() {
        let mut near = agent_at(1, 0.0, 0.0);
        // Neighbor heading the same way, 5 units away (inside contact): repelled.
        near.decide_direction(&[NeighborReading {
            distance: 5.0,
            direction: Vector2::new(1.0, 0.0),
        }]);
        assert_eq!(near.direction(), Vector2::new(-1.0, 0.0));

        let mut far = agent_at(2, 0.0, 0.0);
        far.decide_direction(&[NeighborReading {
            distance: 25.0,
            direction: Vector2::new(1.0, 0.0),
        }]);
        assert_eq!(far.direction(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn flock_steering_sums_over_neighbors() {
        let mut a = agent_at(1, 0.0, 0.0).with_direction(Vector2::new(0.0, 1.0));
        a.decide_direction(&[
            NeighborReading { distance: 20.0, direction: Vector2::new(1.0, 0.0) },
            NeighborReading { distance: 20.0, direction: Vector2::new(-1.0, 0.0) },
        ]);
        // x contributions cancel; y = 2 * (1 + 0) * 10
        assert_eq!(a.direction(), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn update_moves_wraps_and_rewards() {
        let mut a = agent_at(1, 99.5, 50.0);
        a.update(&[a.presence()], 100.0, 100.0);
        assert!((a.position().x - 0.5).abs() < 1e-9);
        assert_eq!(a.position().y, 50.0);
        assert_eq!(a.fitness(), 1.0);
        assert_eq!(a.state(), DisplayState::Initial);
    }

    #[test]
    fn update_wraps_into_a_shrunken_canvas() {
        let mut a = agent_at(1, 450.0, 320.0);
        a.update(&[a.presence()], 100.0, 100.0);
        assert!((a.position().x - 51.0).abs() < 1e-9);
        assert!((a.position().y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn lone_agent_fitness_counts_ticks() {
        let mut a = agent_at(1, 10.0, 10.0);
        for _ in 0..250 {
            let view = [a.presence()];
            a.update(&view, 100.0, 80.0);
            assert!(!a.detect_proximity_all(0, &view));
        }
        assert_eq!(a.fitness(), 250.0);
        assert!(a.neighbors().is_empty());
    }

    #[test]
    fn proximity_skips_own_slot() {
        let mut a = agent_at(1, 10.0, 10.0);
        let view = [agent_at(2, 50.0, 10.0).presence(), a.presence()];
        assert!(!a.detect_proximity_all(1, &view));
        assert!(a.neighbors().is_empty());
        assert_eq!(a.state(), DisplayState::Initial);
    }

    #[test]
    fn shared_id_in_another_slot_is_not_self() {
        let mut a = agent_at(1, 10.0, 10.0);
        let twin = agent_at(1, 15.0, 10.0);
        let view = [a.presence(), twin.presence()];
        assert!(a.detect_proximity_all(0, &view));
        assert_eq!(a.neighbors(), &[1]);
        assert_eq!(a.state(), DisplayState::Hit);
        assert!((a.fitness() - -10.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_marks_hit_and_charges_penalty() {
        let mut a = agent_at(1, 10.0, 10.0);
        let b = agent_at(2, 14.0, 10.0);
        assert!(a.detect_proximity(1, &b.presence()));
        assert_eq!(a.state(), DisplayState::Hit);
        assert!((a.fitness() - -12.0).abs() < 1e-9);
        assert_eq!(a.neighbors(), &[1]);
    }

    #[test]
    fn sensed_but_not_touching_is_neighbor_only() {
        let mut a = agent_at(1, 10.0, 10.0);
        let b = agent_at(2, 30.0, 10.0);
        assert!(!a.detect_proximity(1, &b.presence()));
        assert_eq!(a.neighbors(), &[1]);
        assert_eq!(a.state(), DisplayState::Initial);
        assert_eq!(a.fitness(), 0.0);
    }

    #[test]
    fn collision_is_symmetric() {
        for gap in [0.0, 3.0, 9.99, 10.0, 10.01, 29.0, 31.0] {
            let mut a = agent_at(1, 50.0, 50.0);
            let mut b = agent_at(2, 50.0 + gap, 50.0);
            let (pa, pb) = (a.presence(), b.presence());
            let ab = a.detect_proximity(1, &pb);
            let ba = b.detect_proximity(0, &pa);
            assert_eq!(ab, ba, "gap {}", gap);
            assert_eq!(ab, gap < 10.0, "gap {}", gap);
        }
    }

    #[test]
    fn hit_clears_on_next_update() {
        let mut a = agent_at(1, 10.0, 10.0);
        let b = agent_at(2, 12.0, 10.0);
        a.detect_proximity(1, &b.presence());
        assert_eq!(a.state(), DisplayState::Hit);
        a.update(&[a.presence(), b.presence()], 100.0, 100.0);
        assert_eq!(a.state(), DisplayState::Initial);
        assert!(a.neighbors().is_empty());
    }

    #[test]
    fn update_reads_sensing_radius_from_genome() {
        let mut a = agent_at(1, 10.0, 10.0);
        let mut g = *a.genome();
        g.set_gene(9, 55.0);
        a.genome = g;
        assert_eq!(a.sensing_radius(), 30.0);
        a.update(&[a.presence()], 100.0, 100.0);
        assert_eq!(a.sensing_radius(), 55.0);
    }

    #[test]
    fn reset_for_generation_zeroes_fitness_and_neighbors() {
        let mut a = agent_at(1, 10.0, 10.0);
        let b = agent_at(2, 15.0, 10.0);
        a.detect_proximity(1, &b.presence());
        a.reset_for_generation();
        assert_eq!(a.fitness(), 0.0);
        assert!(a.neighbors().is_empty());
    }
}
