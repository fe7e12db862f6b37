//! Genetic operator — rank, recombine, mutate, reset.
//!
//! Runs once per generation over the whole population. Parents are drawn
//! uniformly from the population, so an agent may be paired with itself;
//! in that case crossover changes nothing but mutation still applies.
//! Ranking decides only which agent is marked as champion and which half
//! has its `Hit` tag cleared.

use evoswarm_core::agent::Agent;
use evoswarm_core::genome::ReproductionParams;
use evoswarm_core::types::AgentId;
use rand::Rng;

/// Sort agents by descending fitness. Ties keep their previous order.
pub fn rank_by_fitness(agents: &mut [Agent]) {
    agents.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

/// Run one generational step in place and return the champion.
///
/// Agents reproduce in ranked order, each with a copy of its sampled
/// parent's genome as it stands at that moment. Returns `None` only for an
/// empty population.
pub fn evolve<R: Rng + ?Sized>(
    agents: &mut [Agent],
    params: &ReproductionParams,
    rng: &mut R,
) -> Option<AgentId> {
    if agents.is_empty() {
        return None;
    }

    rank_by_fitness(agents);
    let champion = agents[0].id();

    let n = agents.len();
    for i in 0..n {
        let parent = *agents[rng.random_range(0..n)].genome();
        agents[i].reproduce_genome(&parent, params, rng);
    }

    for agent in agents.iter_mut() {
        agent.reset_for_generation();
    }
    for agent in &mut agents[n.div_ceil(2)..] {
        agent.clear_hit();
    }

    Some(champion)
}
