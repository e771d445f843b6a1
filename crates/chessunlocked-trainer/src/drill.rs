use chessunlocked_catalog::DrillQuestion;
use chessunlocked_core::BoardSurface;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

use crate::DrillError;

/// How a drill's options are ordered when it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionOrder {
    /// The authored order.
    #[default]
    Authored,
    /// A shuffle determined by `seed` and the drill index.
    ///
    /// Loading the same drill twice yields the same order.
    Shuffled {
        /// Base seed.
        seed: u64,
    },
}

impl OptionOrder {
    fn arrange(self, drill_index: usize, option_count: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..option_count).collect();
        if let Self::Shuffled { seed } = self {
            let mut rng = Pcg64::seed_from_u64(seed.wrapping_add(drill_index as u64));
            order.shuffle(&mut rng);
        }
        order
    }
}

/// Grade of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Verdict {
    /// The selection equals the stored answer.
    Correct,
    /// Anything else.
    Incorrect,
}

/// Visual mark on one presented option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum OptionMark {
    /// Not graded.
    #[default]
    Unmarked,
    /// Shown as the right answer.
    Correct,
    /// Shown as a wrong selection.
    Incorrect,
}

/// An option as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedOption<'a> {
    /// Option text.
    pub text: &'a str,
    /// Current mark.
    pub mark: OptionMark,
}

#[derive(Debug, Clone)]
struct LoadedDrill {
    index: usize,
    order: Vec<usize>,
    marks: Vec<OptionMark>,
    verdict: Option<Verdict>,
}

/// Presents multiple-choice drills and grades answers.
#[derive(Debug, Clone)]
pub struct DrillEngine {
    drills: Vec<DrillQuestion>,
    option_order: OptionOrder,
    loaded: Option<LoadedDrill>,
}

impl DrillEngine {
    /// Creates an engine over the configured drills, using the authored
    /// option order.
    #[must_use]
    pub fn new(drills: Vec<DrillQuestion>) -> Self {
        Self {
            drills,
            option_order: OptionOrder::Authored,
            loaded: None,
        }
    }

    /// Sets the option order policy for subsequent loads.
    #[must_use]
    pub fn with_option_order(mut self, order: OptionOrder) -> Self {
        self.option_order = order;
        self
    }

    /// Returns the number of configured drills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    /// Returns `true` if no drills are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    /// Returns the configured drills.
    #[must_use]
    pub fn drills(&self) -> &[DrillQuestion] {
        &self.drills
    }

    /// Loads the drill at `index` and presents its board.
    ///
    /// Any previous marks and verdict are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`DrillError::DrillIndexOutOfRange`] if `index >= len()`; the
    /// current drill stays loaded.
    pub fn load_drill(
        &mut self,
        index: usize,
        surface: &mut BoardSurface,
    ) -> Result<&DrillQuestion, DrillError> {
        let drill = self
            .drills
            .get(index)
            .ok_or(DrillError::DrillIndexOutOfRange {
                index,
                len: self.drills.len(),
            })?;
        let option_count = drill.options().len();
        self.loaded = Some(LoadedDrill {
            index,
            order: self.option_order.arrange(index, option_count),
            marks: vec![OptionMark::Unmarked; option_count],
            verdict: None,
        });
        surface.present(drill.board());
        log::debug!("loaded drill #{index}");
        Ok(drill)
    }

    /// Loads the drill after the current one, wrapping to the first.
    ///
    /// With nothing loaded yet, loads drill 0.
    ///
    /// # Errors
    ///
    /// Returns [`DrillError::DrillIndexOutOfRange`] if no drills are
    /// configured.
    pub fn next_drill(&mut self, surface: &mut BoardSurface) -> Result<&DrillQuestion, DrillError> {
        let next = match &self.loaded {
            Some(loaded) if !self.drills.is_empty() => (loaded.index + 1) % self.drills.len(),
            _ => 0,
        };
        self.load_drill(next, surface)
    }

    /// Grades `selected` against the loaded drill's answer.
    ///
    /// Comparison is exact and case-sensitive. The selected option is marked
    /// with the verdict; on a wrong answer the right option is revealed too.
    /// Submitting again recomputes marks for the new selection.
    ///
    /// # Errors
    ///
    /// Returns [`DrillError::NoDrillLoaded`] before any drill is loaded.
    pub fn submit_answer(&mut self, selected: &str) -> Result<Verdict, DrillError> {
        let loaded = self.loaded.as_mut().ok_or(DrillError::NoDrillLoaded)?;
        let drill = &self.drills[loaded.index];

        let verdict = if drill.is_answer(selected) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        for (mark, option) in loaded.marks.iter_mut().zip(drill.options()) {
            *mark = if drill.is_answer(option) {
                OptionMark::Correct
            } else if option == selected {
                OptionMark::Incorrect
            } else {
                OptionMark::Unmarked
            };
        }
        loaded.verdict = Some(verdict);
        log::debug!("drill #{} answered {selected:?}: {verdict:?}", loaded.index);
        Ok(verdict)
    }

    /// Returns the loaded drill and its index.
    #[must_use]
    pub fn current(&self) -> Option<(usize, &DrillQuestion)> {
        let loaded = self.loaded.as_ref()?;
        Some((loaded.index, &self.drills[loaded.index]))
    }

    /// Returns the loaded drill's options in presentation order, with marks.
    #[must_use]
    pub fn presented_options(&self) -> Vec<PresentedOption<'_>> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        let options = self.drills[loaded.index].options();
        loaded
            .order
            .iter()
            .map(|&i| PresentedOption {
                text: &options[i],
                mark: loaded.marks[i],
            })
            .collect()
    }

    /// Returns the verdict of the last submission for the loaded drill.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.loaded.as_ref().and_then(|l| l.verdict)
    }
}
