use std::{fs, path::Path};

use chessunlocked_core::BoardState;

use crate::{
    ConfigError, DrillDefinitionError, DrillQuestion, Opening, OpeningDefinitionError, OpeningStep,
    raw::{CatalogDto, DrillDto, OpeningDto},
};

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// The static set of openings and drills.
///
/// Opening names are unique; openings keep their authored order, which is
/// the order offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    openings: Vec<Opening>,
    drills: Vec<DrillQuestion>,
}

impl Catalog {
    /// Builds a catalog from already-validated entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOpening`] if two openings share a name.
    pub fn new(openings: Vec<Opening>, drills: Vec<DrillQuestion>) -> Result<Self, ConfigError> {
        for (i, opening) in openings.iter().enumerate() {
            if openings[..i].iter().any(|o| o.name() == opening.name()) {
                return Err(ConfigError::DuplicateOpening {
                    name: opening.name().to_owned(),
                });
            }
        }
        Ok(Self { openings, drills })
    }

    /// Loads the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the bundled data is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise any
    /// error from [`Catalog::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        log::info!("loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Parses and validates a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on invalid JSON, malformed boards, empty
    /// openings, duplicate names, or invalid drills.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let dto: CatalogDto = serde_json::from_str(text)?;

        let openings = dto
            .openings
            .into_iter()
            .map(opening_from_dto)
            .collect::<Result<Vec<_>, _>>()?;
        let drills = dto
            .drills
            .into_iter()
            .enumerate()
            .map(|(index, drill)| {
                drill_from_dto(drill).map_err(|source| ConfigError::Drill { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::new(openings, drills)?;
        log::info!(
            "catalog ready: {} openings, {} drills",
            catalog.openings.len(),
            catalog.drills.len()
        );
        Ok(catalog)
    }

    /// Returns the openings in authored order.
    #[must_use]
    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    /// Looks up an opening by exact name.
    #[must_use]
    pub fn opening(&self, name: &str) -> Option<&Opening> {
        self.openings.iter().find(|o| o.name() == name)
    }

    /// Returns the drills in authored order.
    #[must_use]
    pub fn drills(&self) -> &[DrillQuestion] {
        &self.drills
    }

    /// Splits the catalog into its openings and drills.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Opening>, Vec<DrillQuestion>) {
        (self.openings, self.drills)
    }
}

fn opening_from_dto(dto: OpeningDto) -> Result<Opening, ConfigError> {
    let OpeningDto { name, steps } = dto;
    let steps = steps
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<OpeningStep, OpeningDefinitionError> {
            let board = BoardState::from_rows(&raw.board)
                .map_err(|source| OpeningDefinitionError::Board { step: index, source })?;
            let step = OpeningStep::new(board, raw.move_label);
            Ok(match raw.position {
                Some(position) => step.with_position_name(position),
                None => step,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .and_then(|steps| Opening::new(name.clone(), steps));
    steps.map_err(|source| ConfigError::Opening { name, source })
}

fn drill_from_dto(dto: DrillDto) -> Result<DrillQuestion, DrillDefinitionError> {
    let DrillDto {
        board,
        question,
        options,
        answer,
        opening,
    } = dto;
    let board = BoardState::from_rows(&board).map_err(DrillDefinitionError::Board)?;
    let drill = DrillQuestion::new(board, question, options, answer)?;
    Ok(match opening {
        Some(opening) => drill.with_opening(opening),
        None => drill,
    })
}
