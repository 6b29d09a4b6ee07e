//! Button identifier configuration.

use crate::model::{ButtonAction, Constant, Function, Operator, TransformKind};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A button override names an action that does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown action '{action}' for button '{label}'")]
pub struct UnknownAction {
    /// Button label from the configuration.
    pub label: String,
    /// Action name that failed to resolve.
    pub action: String,
}

/// Maps button identifiers (labels) to domain actions.
///
/// Provides a default calculator layout with option to override via
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    bindings: HashMap<String, ButtonAction>,
}

impl ButtonMap {
    /// Look up the action for a button label.
    pub fn get(&self, label: &str) -> Option<ButtonAction> {
        self.bindings.get(label).copied()
    }

    /// Add or replace one binding.
    pub fn bind(&mut self, label: impl Into<String>, action: ButtonAction) {
        self.bindings.insert(label.into(), action);
    }

    /// Number of bound labels.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if no label is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Every binding sorted by label, for help output.
    pub fn sorted(&self) -> BTreeMap<&str, ButtonAction> {
        self.bindings
            .iter()
            .map(|(label, action)| (label.as_str(), *action))
            .collect()
    }

    /// Apply `label = "action-name"` overrides on top of this map.
    ///
    /// # Errors
    ///
    /// Returns the first override whose action name is unknown. The map is
    /// left unchanged in that case.
    pub fn with_overrides(
        mut self,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, UnknownAction> {
        let resolved = overrides
            .iter()
            .map(|(label, name)| {
                ButtonAction::from_name(name)
                    .map(|action| (label.clone(), action))
                    .ok_or_else(|| UnknownAction {
                        label: label.clone(),
                        action: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.bindings.extend(resolved);
        Ok(self)
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Digits
        for d in 0..=9u8 {
            bindings.insert(d.to_string(), ButtonAction::Digit(d));
        }
        bindings.insert(".".to_string(), ButtonAction::DecimalPoint);

        // Operators, including the keypad glyphs
        for op in Operator::ALL {
            bindings.insert(op.symbol().to_string(), ButtonAction::Operator(op));
        }
        bindings.insert("×".to_string(), ButtonAction::Operator(Operator::Multiply));
        bindings.insert("÷".to_string(), ButtonAction::Operator(Operator::Divide));
        bindings.insert("−".to_string(), ButtonAction::Operator(Operator::Subtract));
        bindings.insert("(".to_string(), ButtonAction::OpenParen);
        bindings.insert(")".to_string(), ButtonAction::CloseParen);

        // Constants
        bindings.insert("pi".to_string(), ButtonAction::Constant(Constant::Pi));
        bindings.insert("π".to_string(), ButtonAction::Constant(Constant::Pi));
        bindings.insert("e".to_string(), ButtonAction::Constant(Constant::E));

        // Functions by name, plus the glyph buttons
        for func in Function::ALL {
            bindings.insert(func.name().to_string(), ButtonAction::Function(func));
        }
        bindings.insert("√".to_string(), ButtonAction::Function(Function::Sqrt));
        bindings.insert("x²".to_string(), ButtonAction::Square);
        bindings.insert("Ans".to_string(), ButtonAction::Ans);

        // Editing
        bindings.insert("DEL".to_string(), ButtonAction::Backspace);
        bindings.insert("⌦".to_string(), ButtonAction::Delete);
        bindings.insert("AC".to_string(), ButtonAction::Clear);
        bindings.insert("←".to_string(), ButtonAction::CursorLeft);
        bindings.insert("→".to_string(), ButtonAction::CursorRight);

        // Session
        bindings.insert("=".to_string(), ButtonAction::Evaluate);
        bindings.insert("DEG/RAD".to_string(), ButtonAction::ToggleAngleMode);
        bindings.insert("2nd".to_string(), ButtonAction::ToggleSecond);
        bindings.insert("CH".to_string(), ButtonAction::ClearHistory);

        // Symbolic transforms
        for kind in TransformKind::ALL {
            bindings.insert(kind.name().to_string(), ButtonAction::Transform(kind));
        }

        Self { bindings }
    }
}
