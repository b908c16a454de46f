use crate::pathfinder::GridPath;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct PathStatistics {
    pub ruleset: &'static str,
    pub steps: usize,
    pub cost: u32,
    pub expanded: usize,
    pub optimal_cost: Option<u32>,
    pub route_efficiency: f64,
}

impl PathStatistics {
    pub fn new(ruleset: &'static str, path: &GridPath, optimal_cost: Option<u32>) -> Self {
        let mut stats = PathStatistics {
            ruleset,
            steps: path.steps(),
            cost: path.cost,
            expanded: path.expanded,
            optimal_cost,
            route_efficiency: 0.0,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Ratio of the found cost to the reference optimum; 1.0 is optimal.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_cost {
            Some(optimal) if optimal > 0 => self.cost as f64 / optimal as f64,
            Some(_) if self.cost == 0 => 1.0,
            _ => 0.0,
        };
    }

    pub fn is_optimal(&self) -> bool {
        self.optimal_cost == Some(self.cost)
    }
}

impl fmt::Display for PathStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ruleset: {}", self.ruleset)?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Path Cost: {}", self.cost)?;
        writeln!(f, "Expanded Nodes: {}", self.expanded)?;
        match self.optimal_cost {
            Some(optimal) => writeln!(f, "Optimal Cost: {}", optimal)?,
            None => writeln!(f, "Optimal Cost: unknown")?,
        }
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;

        if self.optimal_cost.is_some() && !self.is_optimal() {
            writeln!(
                f,
                "Note: heuristic overestimates with these weights; the path is not the cheapest"
            )?;
        }
        Ok(())
    }
}
