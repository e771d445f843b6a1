use chessunlocked_trainer::{OptionMark, PresentedOption, Verdict};
use eframe::egui::{Button, Color32, RichText, Ui, Visuals};

use crate::action::{ActionRequestQueue, DrillAction};

#[derive(Debug, Clone)]
pub(crate) struct DrillInfo<'a> {
    pub(crate) number: usize,
    pub(crate) prompt: &'a str,
    pub(crate) opening: Option<&'a str>,
    pub(crate) options: Vec<PresentedOption<'a>>,
    pub(crate) verdict: Option<Verdict>,
}

#[derive(Debug, Clone)]
pub(crate) struct DrillPanelViewModel<'a> {
    count: usize,
    drill: Option<DrillInfo<'a>>,
}

impl<'a> DrillPanelViewModel<'a> {
    #[must_use]
    pub(crate) fn new(count: usize, drill: Option<DrillInfo<'a>>) -> Self {
        Self { count, drill }
    }

    #[must_use]
    pub(crate) fn drill(&self) -> Option<&DrillInfo<'a>> {
        self.drill.as_ref()
    }
}

const CORRECT_FILL: Color32 = Color32::from_rgb(0x2e, 0x7d, 0x32);

fn option_fill(mark: OptionMark, visuals: &Visuals) -> Option<Color32> {
    match mark {
        OptionMark::Unmarked => None,
        OptionMark::Correct => Some(CORRECT_FILL),
        OptionMark::Incorrect => Some(visuals.error_fg_color),
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &DrillPanelViewModel, action_queue: &mut ActionRequestQueue) {
    ui.heading("Practice Drills");

    let Some(drill) = vm.drill() else {
        if vm.count == 0 {
            ui.label("No drills are configured.");
        } else if ui.button("Start drilling").clicked() {
            action_queue.request(DrillAction::Load(0).into());
        }
        return;
    };

    ui.label(format!("Drill {} of {}", drill.number, vm.count));
    if let Some(opening) = drill.opening {
        ui.label(RichText::new(opening).italics());
    }
    ui.add_space(ui.spacing().item_spacing.y);
    ui.label(RichText::new(drill.prompt).size(18.0).strong());

    let visuals = ui.visuals().clone();
    ui.horizontal_wrapped(|ui| {
        for option in &drill.options {
            let text = RichText::new(option.text).size(18.0);
            let button = match option_fill(option.mark, &visuals) {
                Some(fill) => Button::new(text.color(Color32::WHITE)).fill(fill),
                None => Button::new(text),
            };
            if ui.add(button).clicked() {
                action_queue.request(DrillAction::Submit(option.text.to_owned()).into());
            }
        }
    });

    match drill.verdict {
        Some(Verdict::Correct) => {
            ui.label(RichText::new("Correct! Well played.").color(CORRECT_FILL));
        }
        Some(Verdict::Incorrect) => {
            ui.label(
                RichText::new("Not quite. The right move is highlighted.")
                    .color(visuals.error_fg_color),
            );
        }
        None => {}
    }

    ui.separator();
    if ui.button("Next drill ▶").clicked() {
        action_queue.request(DrillAction::Next.into());
    }
}
