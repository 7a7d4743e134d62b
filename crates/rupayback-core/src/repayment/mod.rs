pub mod payoff;
pub mod schedule;
