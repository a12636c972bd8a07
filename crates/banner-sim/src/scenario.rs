use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use banner_core::{Loc, Rules};

/// Everything needed to reproduce one match, loadable from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub seed: u64,
    pub rounds: u32,
    pub agents_per_team: u32,
    pub rules: Rules,
    pub walls: Vec<Loc>,
    pub red_spawns: Vec<Loc>,
    pub blue_spawns: Vec<Loc>,
    pub red_flags: Vec<Loc>,
    pub blue_flags: Vec<Loc>,
    /// Round at which both teams gain the capture upgrade, if any.
    pub capture_upgrade_round: Option<u32>,
}

impl Default for Scenario {
    fn default() -> Self {
        let rules = Rules {
            map_width: 32,
            map_height: 32,
            setup_rounds: 20,
            ..Rules::default()
        };
        Self {
            name: "skirmish-32".to_string(),
            seed: 1,
            rounds: 500,
            agents_per_team: 6,
            rules,
            walls: default_walls(),
            red_spawns: vec![Loc::new(1, 1), Loc::new(2, 1), Loc::new(1, 2)],
            blue_spawns: vec![Loc::new(30, 30), Loc::new(29, 30), Loc::new(30, 29)],
            red_flags: vec![Loc::new(3, 3), Loc::new(3, 8), Loc::new(8, 3)],
            blue_flags: vec![Loc::new(28, 28), Loc::new(28, 23), Loc::new(23, 28)],
            capture_upgrade_round: None,
        }
    }
}

fn default_walls() -> Vec<Loc> {
    let mut walls = Vec::new();
    // A broken diagonal ridge through the middle of the map.
    for k in 8..24 {
        if k % 5 == 0 {
            continue;
        }
        walls.push(Loc::new(k, 31 - k));
    }
    walls
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario from {}", path.display()))?;
        let scenario: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse scenario from {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize scenario")
    }

    /// Reject layouts the world cannot represent.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.rules.map_width, self.rules.map_height);
        anyhow::ensure!(w > 0 && h > 0, "map must be non-empty");
        anyhow::ensure!(
            !self.red_spawns.is_empty() && !self.blue_spawns.is_empty(),
            "both teams need at least one spawn site"
        );
        for (what, locs) in [
            ("wall", &self.walls),
            ("red spawn", &self.red_spawns),
            ("blue spawn", &self.blue_spawns),
            ("red flag", &self.red_flags),
            ("blue flag", &self.blue_flags),
        ] {
            for at in locs.iter() {
                anyhow::ensure!(at.is_within(w, h), "{what} site {at} is off the map");
            }
        }
        Ok(())
    }
}
