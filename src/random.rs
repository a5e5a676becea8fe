use rand::Rng;

/// Source of the random decisions made while carving a maze.
pub trait RandomSource {
    /// A uniformly distributed integer in the closed range `[min, max]`.
    fn int_in_range(&mut self, min: usize, max: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn int_in_range(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            min
        } else {
            self.gen_range(min..=max)
        }
    }
}

/// Replays a fixed list of draws, cycling back to the start when it runs out.
///
/// A draw `v` requested for `[min, max]` yields `min + v % (max - min + 1)`, so scripts can be
/// written as choice indices. Every request consumes a draw, even a single value range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<usize>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<usize>) -> ScriptedRandom {
        ScriptedRandom {
            draws,
            position: 0,
        }
    }

    pub fn draws_taken(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedRandom {
    fn int_in_range(&mut self, min: usize, max: usize) -> usize {
        if self.draws.is_empty() {
            return min;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;

        if min >= max {
            return min;
        }
        match (max - min).checked_add(1) {
            Some(span) => min + draw % span,
            None => min.saturating_add(draw),
        }
    }
}
