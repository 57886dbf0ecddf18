use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::Result;

type Styles = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The card itself.
    Card,
    /// The first descendant matching the selector.
    Child(&'static str),
    /// Every matching descendant, optionally delayed one stagger step per index.
    EachChild { selector: &'static str, staggered: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub target: Target,
    pub styles: Styles,
}

/// Hover and click behaviour for one family of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDecoration {
    pub selector: &'static str,
    pub enter: &'static [StyleRule],
    pub leave: &'static [StyleRule],
    pub pulse_on_click: bool,
}

pub const PULSE_ANIMATION: &str = "pulse 0.6s ease-out";

pub const MODEL_CARDS: CardDecoration = CardDecoration {
    selector: ".model-card",
    enter: &[
        StyleRule {
            target: Target::Card,
            styles: &[
                ("box-shadow", "0 15px 40px rgba(102, 126, 234, 0.3)"),
                ("border-color", "#667eea"),
            ],
        },
        StyleRule {
            target: Target::Child(".model-icon"),
            styles: &[("transform", "scale(1.1)"), ("transition", "transform 0.3s ease")],
        },
    ],
    leave: &[
        StyleRule {
            target: Target::Card,
            styles: &[("box-shadow", ""), ("border-color", "rgba(255, 255, 255, 0.1)")],
        },
        StyleRule {
            target: Target::Child(".model-icon"),
            styles: &[("transform", "scale(1)")],
        },
    ],
    pulse_on_click: true,
};

pub const PLATFORM_CARDS: CardDecoration = CardDecoration {
    selector: ".platform-card",
    enter: &[StyleRule {
        target: Target::Child(".status-dot"),
        styles: &[("transform", "scale(1.2)"), ("transition", "transform 0.3s ease")],
    }],
    leave: &[StyleRule {
        target: Target::Child(".status-dot"),
        styles: &[("transform", "scale(1)")],
    }],
    pulse_on_click: false,
};

pub const FEATURE_CARDS: CardDecoration = CardDecoration {
    selector: ".feature-card",
    enter: &[
        StyleRule {
            target: Target::Child(".feature-benefit"),
            styles: &[
                ("background", "rgba(102, 126, 234, 0.2)"),
                ("border-left-color", "#f093fb"),
                ("transition", "all 0.3s ease"),
            ],
        },
        StyleRule {
            target: Target::EachChild {
                selector: ".feature-list li",
                staggered: true,
            },
            styles: &[("transform", "translateX(5px)"), ("transition", "transform 0.2s ease")],
        },
    ],
    leave: &[
        StyleRule {
            target: Target::Child(".feature-benefit"),
            styles: &[
                ("background", "rgba(102, 126, 234, 0.1)"),
                ("border-left-color", "#667eea"),
            ],
        },
        StyleRule {
            target: Target::EachChild {
                selector: ".feature-list li",
                staggered: false,
            },
            styles: &[("transform", "translateX(0)")],
        },
    ],
    pulse_on_click: false,
};

pub const TESTIMONIAL_CARDS: CardDecoration = CardDecoration {
    selector: ".testimonial-card",
    enter: &[StyleRule {
        target: Target::Child(".testimonial-author img"),
        styles: &[("transform", "scale(1.1)"), ("transition", "transform 0.3s ease")],
    }],
    leave: &[StyleRule {
        target: Target::Child(".testimonial-author img"),
        styles: &[("transform", "scale(1)")],
    }],
    pulse_on_click: false,
};

pub const CARD_DECORATIONS: [CardDecoration; 4] =
    [MODEL_CARDS, PLATFORM_CARDS, FEATURE_CARDS, TESTIMONIAL_CARDS];

fn apply_rules(card: &HtmlElement, rules: &[StyleRule], stagger_ms: u32) {
    for rule in rules {
        match rule.target {
            Target::Card => dom::apply_styles(card, rule.styles),
            Target::Child(selector) => {
                if let Some(child) = dom::first_within(card, selector) {
                    dom::apply_styles(&child, rule.styles);
                }
            }
            Target::EachChild { selector, staggered } => {
                let Ok(children) = dom::select_within(card, selector) else {
                    continue;
                };
                for (index, child) in children.into_iter().enumerate() {
                    if staggered {
                        let styles = rule.styles;
                        Timeout::new(dom::stagger_delay(index, stagger_ms), move || {
                            dom::apply_styles(&child, styles);
                        })
                        .forget();
                    } else {
                        dom::apply_styles(&child, rule.styles);
                    }
                }
            }
        }
    }
}

fn decorate(card: &HtmlElement, decoration: &CardDecoration, config: &LandingConfig) -> Result<()> {
    let stagger_ms = config.feature_list_stagger_ms;

    let enter = decoration.enter;
    let card_clone = card.clone();
    dom::listen(card, "mouseenter", move |_| apply_rules(&card_clone, enter, stagger_ms))?;

    let leave = decoration.leave;
    let card_clone = card.clone();
    dom::listen(card, "mouseleave", move |_| apply_rules(&card_clone, leave, stagger_ms))?;

    if decoration.pulse_on_click {
        let pulse_ms = config.pulse_ms;
        let card_clone = card.clone();
        dom::listen(card, "click", move |_| {
            dom::apply_styles(&card_clone, &[("animation", PULSE_ANIMATION)]);
            let card = card_clone.clone();
            Timeout::new(pulse_ms, move || {
                dom::apply_styles(&card, &[("animation", "")]);
            })
            .forget();
        })?;
    }
    Ok(())
}

/// Binds hover and click decorations for every card family on the page.
pub fn init_cards(document: &Document, config: &LandingConfig) -> Result<usize> {
    let mut bound = 0;
    for decoration in &CARD_DECORATIONS {
        for card in dom::select_all(document, decoration.selector)? {
            decorate(&card, decoration, config)?;
            bound += 1;
        }
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touched_properties(rules: &[StyleRule], target: Target) -> Vec<&'static str> {
        rules
            .iter()
            .filter(|rule| rule.target == target)
            .flat_map(|rule| rule.styles.iter().map(|(property, _)| *property))
            .collect()
    }

    #[test]
    fn leave_resets_what_enter_changed() {
        for decoration in &CARD_DECORATIONS {
            for rule in decoration.enter {
                let reset = decoration.leave.iter().find(|leave| match (leave.target, rule.target) {
                    (Target::EachChild { selector: a, .. }, Target::EachChild { selector: b, .. }) => a == b,
                    (a, b) => a == b,
                });
                let reset = reset.unwrap_or_else(|| {
                    panic!("{} never resets {:?}", decoration.selector, rule.target)
                });
                for (property, _) in rule.styles.iter().filter(|(p, _)| *p != "transition") {
                    assert!(
                        reset.styles.iter().any(|(p, _)| p == property),
                        "{} leaves {} set",
                        decoration.selector,
                        property
                    );
                }
            }
        }
    }

    #[test]
    fn only_model_cards_pulse() {
        let pulsing: Vec<_> = CARD_DECORATIONS
            .iter()
            .filter(|d| d.pulse_on_click)
            .map(|d| d.selector)
            .collect();
        assert_eq!(pulsing, vec![".model-card"]);
    }

    #[test]
    fn model_hover_glows_and_clears_shadow() {
        assert_eq!(
            touched_properties(MODEL_CARDS.enter, Target::Card),
            vec!["box-shadow", "border-color"]
        );
        let leave_shadow = MODEL_CARDS.leave[0].styles.iter().find(|(p, _)| *p == "box-shadow");
        assert_eq!(leave_shadow, Some(&("box-shadow", "")));
    }
}
