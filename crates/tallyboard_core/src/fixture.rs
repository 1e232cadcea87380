//! Puzzle fixtures: the static session configuration.
//!
//! Fixtures are plain serde data, validated once when a session is built
//! and never touched afterwards.

use super::types::{Grid, PlayArea, TokenId, ZoneId};
use derive_more::{Display, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// Fixture validation error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Fixture error: {} at {}:{}", message, file, line)]
pub struct FixtureError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl FixtureError {
    /// Creates a new fixture error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Freeform fixtures
// ─────────────────────────────────────────────────────────────

/// A freeform token and where it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlacedTokenSpec {
    /// Token id.
    pub id: TokenId,
    /// Token value.
    pub value: i64,
    /// Starting x.
    pub x: f64,
    /// Starting y.
    pub y: f64,
}

/// A circular region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionSpec {
    /// Region id.
    pub id: ZoneId,
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Radius; must be positive.
    pub radius: f64,
    /// Target sum.
    pub target: i64,
}

/// Freeform puzzle definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FreeformFixture {
    /// Rectangle tokens are kept inside.
    pub play_area: PlayArea,
    /// Rendered token radius, used to keep tokens fully inside the play area.
    pub token_radius: f64,
    /// Tokens with starting positions.
    pub tokens: Vec<PlacedTokenSpec>,
    /// Scoring regions.
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl FreeformFixture {
    /// Nine tokens valued 1 to 9 and six overlapping regions.
    pub fn classic() -> Self {
        let tokens = (1..=9)
            .map(|value| {
                let column = (value - 1) / 5;
                let row = (value - 1) % 5;
                PlacedTokenSpec {
                    id: TokenId::new(format!("t{}", value)),
                    value,
                    x: 150.0 + 50.0 * column as f64,
                    y: 150.0 + 60.0 * row as f64,
                }
            })
            .collect();
        let region = |id: &str, x: f64, y: f64, radius: f64, target: i64| RegionSpec {
            id: ZoneId::new(id),
            x,
            y,
            radius,
            target,
        };
        Self {
            play_area: PlayArea {
                x: 80.0,
                y: 80.0,
                width: 1200.0,
                height: 700.0,
            },
            token_radius: 25.0,
            tokens,
            regions: vec![
                region("A", 500.0, 300.0, 180.0, 20),
                region("B", 650.0, 250.0, 170.0, 15),
                region("C", 800.0, 350.0, 175.0, 25),
                region("D", 580.0, 450.0, 160.0, 18),
                region("E", 720.0, 500.0, 155.0, 12),
                region("F", 900.0, 200.0, 165.0, 22),
            ],
        }
    }

    /// Checks the fixture for values a session cannot be built from.
    #[instrument(skip(self), fields(tokens = self.tokens.len(), regions = self.regions.len()))]
    pub fn validate(&self) -> Result<(), FixtureError> {
        let r = self.token_radius;
        if !(r.is_finite() && r > 0.0) {
            return Err(FixtureError::new(format!(
                "token radius must be positive, got {}",
                r
            )));
        }
        let area = &self.play_area;
        let finite = [area.x, area.y, area.width, area.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || area.width < 2.0 * r || area.height < 2.0 * r {
            return Err(FixtureError::new(format!(
                "play area {}x{} cannot hold a token of radius {}",
                area.width, area.height, r
            )));
        }

        unique_ids("token", self.tokens.iter().map(|t| t.id.as_str()))?;
        unique_ids("region", self.regions.iter().map(|z| z.id.as_str()))?;
        values_fit(self.tokens.iter().map(|t| t.value))?;

        if let Some(token) = self
            .tokens
            .iter()
            .find(|t| !(t.x.is_finite() && t.y.is_finite()))
        {
            return Err(FixtureError::new(format!(
                "token {} has a non-finite position",
                token.id
            )));
        }
        for region in &self.regions {
            if !(region.x.is_finite() && region.y.is_finite()) {
                return Err(FixtureError::new(format!(
                    "region {} has a non-finite centre",
                    region.id
                )));
            }
            if !(region.radius.is_finite() && region.radius > 0.0) {
                return Err(FixtureError::new(format!(
                    "region {} radius must be positive, got {}",
                    region.id, region.radius
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Grid fixtures
// ─────────────────────────────────────────────────────────────

/// A grid token; grid tokens always start in the tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TokenSpec {
    /// Token id.
    pub id: TokenId,
    /// Token value.
    pub value: i64,
}

/// A set of cells with a target sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AreaSpec {
    /// Area id.
    pub id: ZoneId,
    /// Row-major cell indices.
    pub cells: Vec<usize>,
    /// Target sum.
    pub target: i64,
}

/// Grid puzzle definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GridFixture {
    /// Grid dimensions.
    pub grid: Grid,
    /// Tokens, all starting unplaced.
    pub tokens: Vec<TokenSpec>,
    /// Scoring areas.
    #[serde(default)]
    pub areas: Vec<AreaSpec>,
}

impl GridFixture {
    /// A 5x5 grid with six tokens and four overlapping areas.
    pub fn sampler() -> Self {
        let tokens = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .zip(1..)
            .map(|(id, value)| TokenSpec {
                id: TokenId::new(id),
                value,
            })
            .collect();
        let area = |id: &str, cells: &[usize], target: i64| AreaSpec {
            id: ZoneId::new(id),
            cells: cells.to_vec(),
            target,
        };
        Self {
            grid: Grid::new(5, 5),
            tokens,
            areas: vec![
                area("north", &[0, 1, 5, 6], 7),
                area("east", &[3, 4, 8, 9], 6),
                area("centre", &[6, 7, 8, 12], 8),
                area("diagonal", &[0, 6, 12, 18, 24], 9),
            ],
        }
    }

    /// Checks the fixture for values a session cannot be built from.
    #[instrument(skip(self), fields(tokens = self.tokens.len(), areas = self.areas.len()))]
    pub fn validate(&self) -> Result<(), FixtureError> {
        match self.grid.checked_cell_count() {
            None => {
                return Err(FixtureError::new(format!(
                    "grid {}x{} is too large",
                    self.grid.cols, self.grid.rows
                )));
            }
            Some(0) => {
                return Err(FixtureError::new(format!(
                    "grid {}x{} has no cells",
                    self.grid.cols, self.grid.rows
                )));
            }
            Some(_) => {}
        }
        unique_ids("token", self.tokens.iter().map(|t| t.id.as_str()))?;
        values_fit(self.tokens.iter().map(|t| t.value))?;
        unique_ids("area", self.areas.iter().map(|z| z.id.as_str()))?;
        for area in &self.areas {
            if let Some(cell) = area.cells.iter().find(|c| !self.grid.contains(**c)) {
                return Err(FixtureError::new(format!(
                    "area {} names cell {} outside the {}-cell grid",
                    area.id,
                    cell,
                    self.grid.cell_count()
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Either variant
// ─────────────────────────────────────────────────────────────

/// A puzzle of either variant, tagged by `variant` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PuzzleFixture {
    /// Free positions and circular regions.
    Freeform(FreeformFixture),
    /// Grid cells and cell-set areas.
    Grid(GridFixture),
}

impl PuzzleFixture {
    /// Validates whichever variant this is.
    pub fn validate(&self) -> Result<(), FixtureError> {
        match self {
            PuzzleFixture::Freeform(fixture) => fixture.validate(),
            PuzzleFixture::Grid(fixture) => fixture.validate(),
        }
    }
}

#[track_caller]
fn unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::new(format!("duplicate {} id {:?}", kind, id)));
        }
    }
    Ok(())
}

/// Every zone sum stays within `i64` when the token magnitudes do.
#[track_caller]
fn values_fit(mut values: impl Iterator<Item = i64>) -> Result<(), FixtureError> {
    let total = values.try_fold(0i64, |acc, value| acc.checked_add(value.checked_abs()?));
    match total {
        Some(_) => Ok(()),
        None => Err(FixtureError::new("token values overflow when summed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_validate() {
        assert!(FreeformFixture::classic().validate().is_ok());
        assert!(GridFixture::sampler().validate().is_ok());
    }

    #[test]
    fn test_classic_layout_positions() {
        let fixture = FreeformFixture::classic();
        assert_eq!(fixture.tokens.len(), 9);
        assert_eq!(fixture.tokens[0].id, TokenId::new("t1"));
        assert_eq!((fixture.tokens[0].x, fixture.tokens[0].y), (150.0, 150.0));
        assert_eq!((fixture.tokens[4].x, fixture.tokens[4].y), (150.0, 390.0));
        assert_eq!((fixture.tokens[5].x, fixture.tokens[5].y), (200.0, 150.0));
        assert_eq!((fixture.tokens[8].x, fixture.tokens[8].y), (200.0, 330.0));
        assert_eq!(fixture.regions.len(), 6);
    }

    #[test]
    fn test_duplicate_token_id_rejected() {
        let mut fixture = GridFixture::sampler();
        fixture.tokens[1].id = TokenId::new("a");
        let err = fixture.validate().unwrap_err();
        assert!(err.message.contains("duplicate token id"));
    }

    #[test]
    fn test_area_cell_off_grid_rejected() {
        let mut fixture = GridFixture::sampler();
        fixture.areas[0].cells.push(25);
        assert!(fixture.validate().is_err());
    }

    #[test]
    fn test_nonpositive_radius_rejected() {
        let mut fixture = FreeformFixture::classic();
        fixture.regions[2].radius = 0.0;
        assert!(fixture.validate().is_err());

        let mut fixture = FreeformFixture::classic();
        fixture.token_radius = -1.0;
        assert!(fixture.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let mut fixture = GridFixture::sampler();
        fixture.grid = Grid::new(usize::MAX, 2);
        fixture.areas.clear();
        let err = fixture.validate().unwrap_err();
        assert!(err.message.contains("too large"), "{}", err);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut fixture = GridFixture::sampler();
        fixture.grid = Grid::new(0, 5);
        fixture.areas.clear();
        assert!(fixture.validate().unwrap_err().message.contains("no cells"));
    }

    #[test]
    fn test_huge_token_values_rejected() {
        let mut fixture = GridFixture::sampler();
        fixture.tokens[0].value = i64::MAX;
        fixture.tokens[1].value = i64::MAX;
        let err = fixture.validate().unwrap_err();
        assert!(err.message.contains("overflow"), "{}", err);

        let mut fixture = FreeformFixture::classic();
        fixture.tokens[0].value = i64::MIN;
        assert!(fixture.validate().is_err());
    }

    #[test]
    fn test_large_values_that_fit_accepted() {
        let mut fixture = GridFixture::sampler();
        fixture.tokens[0].value = i64::MAX / 2;
        fixture.tokens[1].value = -(i64::MAX / 4);
        assert!(fixture.validate().is_ok());
    }

    #[test]
    fn test_play_area_too_small_rejected() {
        let mut fixture = FreeformFixture::classic();
        fixture.play_area.width = 40.0;
        assert!(fixture.validate().is_err());
    }

    #[test]
    fn test_tagged_json_round_trip_shape() {
        let json = r#"{
            "variant": "grid",
            "grid": { "cols": 2, "rows": 2 },
            "tokens": [{ "id": "x", "value": 1 }],
            "areas": [{ "id": "all", "cells": [0, 1, 2, 3], "target": 1 }]
        }"#;
        let fixture: PuzzleFixture = serde_json::from_str(json).unwrap();
        assert!(matches!(fixture, PuzzleFixture::Grid(_)));
        assert!(fixture.validate().is_ok());
    }
}
