//! Domain-level calculator actions independent of button labels.

/// Binary operators that insert a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `^`
    Power,
    /// `%`
    Modulo,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
        Operator::Modulo,
    ];

    /// Text inserted into the expression buffer.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Modulo => "%",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
            Operator::Power => "power",
            Operator::Modulo => "modulo",
        }
    }
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Archimedes' constant, `pi`.
    Pi,
    /// Euler's number, `e`.
    E,
}

impl Constant {
    /// Text inserted into the expression buffer.
    pub fn symbol(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }
}

/// Functions inserted as call templates (`name(` + cursor + `)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Square root.
    Sqrt,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log,
    /// Exponential.
    Exp,
    /// Absolute value.
    Abs,
}

impl Function {
    /// All functions, in keypad order.
    pub const ALL: [Function; 14] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Sqrt,
        Function::Ln,
        Function::Log,
        Function::Exp,
        Function::Abs,
    ];

    /// Function name as written in expression text.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Sqrt => "sqrt",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Exp => "exp",
            Function::Abs => "abs",
        }
    }

    /// Counterpart selected when the "2nd" shift is active.
    ///
    /// Functions without a counterpart keep their own meaning.
    pub fn shifted(self) -> Self {
        match self {
            Function::Sin => Function::Asin,
            Function::Cos => Function::Acos,
            Function::Tan => Function::Atan,
            Function::Asin => Function::Sin,
            Function::Acos => Function::Cos,
            Function::Atan => Function::Tan,
            Function::Ln => Function::Exp,
            Function::Exp => Function::Ln,
            other => other,
        }
    }

    /// Template pieces `(prefix, placeholder, suffix)` for buffer insertion.
    pub fn template(self) -> (String, &'static str, &'static str) {
        (format!("{}(", self.name()), "", ")")
    }
}

/// Calculator actions that buttons map to.
///
/// These represent user intent, not specific labels. The mapping from a
/// button identifier to a `ButtonAction` is handled by
/// [`ButtonMap`](crate::config::ButtonMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    // Entry
    /// Insert a decimal digit. Field: digit value (0-9)
    Digit(u8),
    /// Insert `.`
    DecimalPoint,
    /// Insert an operator symbol
    Operator(Operator),
    /// Insert `(`
    OpenParen,
    /// Insert `)`
    CloseParen,
    /// Insert a named constant
    Constant(Constant),
    /// Insert a function call template, honouring the 2nd shift
    Function(Function),
    /// Insert `^2`
    Square,
    /// Insert the last answer's text
    Ans,

    // Editing
    /// Delete before the cursor (or the selection)
    Backspace,
    /// Delete after the cursor (or the selection)
    Delete,
    /// Empty the buffer
    Clear,
    /// Move the cursor one character left
    CursorLeft,
    /// Move the cursor one character right
    CursorRight,

    // Session
    /// Evaluate the buffer
    Evaluate,
    /// Switch between RAD and DEG
    ToggleAngleMode,
    /// Toggle the 2nd shift
    ToggleSecond,
    /// Drop every history entry
    ClearHistory,
    /// Ask the engine for a symbolic transform of the buffer
    Transform(crate::model::TransformKind),
}

impl ButtonAction {
    /// Stable action name, used by configuration overrides.
    pub fn name(&self) -> String {
        match self {
            ButtonAction::Digit(d) => format!("digit-{d}"),
            ButtonAction::DecimalPoint => "point".to_string(),
            ButtonAction::Operator(op) => op.name().to_string(),
            ButtonAction::OpenParen => "open-paren".to_string(),
            ButtonAction::CloseParen => "close-paren".to_string(),
            ButtonAction::Constant(Constant::Pi) => "pi".to_string(),
            ButtonAction::Constant(Constant::E) => "e".to_string(),
            ButtonAction::Function(func) => func.name().to_string(),
            ButtonAction::Square => "square".to_string(),
            ButtonAction::Ans => "ans".to_string(),
            ButtonAction::Backspace => "backspace".to_string(),
            ButtonAction::Delete => "delete".to_string(),
            ButtonAction::Clear => "clear".to_string(),
            ButtonAction::CursorLeft => "cursor-left".to_string(),
            ButtonAction::CursorRight => "cursor-right".to_string(),
            ButtonAction::Evaluate => "evaluate".to_string(),
            ButtonAction::ToggleAngleMode => "toggle-angle".to_string(),
            ButtonAction::ToggleSecond => "second".to_string(),
            ButtonAction::ClearHistory => "clear-history".to_string(),
            ButtonAction::Transform(kind) => kind.name().to_string(),
        }
    }

    /// Parse an action from its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(digit) = name.strip_prefix("digit-") {
            return match digit.parse::<u8>() {
                Ok(d) if d <= 9 => Some(ButtonAction::Digit(d)),
                _ => None,
            };
        }

        let fixed = match name {
            "point" => Some(ButtonAction::DecimalPoint),
            "open-paren" => Some(ButtonAction::OpenParen),
            "close-paren" => Some(ButtonAction::CloseParen),
            "pi" => Some(ButtonAction::Constant(Constant::Pi)),
            "e" => Some(ButtonAction::Constant(Constant::E)),
            "square" => Some(ButtonAction::Square),
            "ans" => Some(ButtonAction::Ans),
            "backspace" => Some(ButtonAction::Backspace),
            "delete" => Some(ButtonAction::Delete),
            "clear" => Some(ButtonAction::Clear),
            "cursor-left" => Some(ButtonAction::CursorLeft),
            "cursor-right" => Some(ButtonAction::CursorRight),
            "evaluate" => Some(ButtonAction::Evaluate),
            "toggle-angle" => Some(ButtonAction::ToggleAngleMode),
            "second" => Some(ButtonAction::ToggleSecond),
            "clear-history" => Some(ButtonAction::ClearHistory),
            _ => None,
        };

        fixed
            .or_else(|| {
                Operator::ALL
                    .into_iter()
                    .find(|op| op.name() == name)
                    .map(ButtonAction::Operator)
            })
            .or_else(|| {
                Function::ALL
                    .into_iter()
                    .find(|func| func.name() == name)
                    .map(ButtonAction::Function)
            })
            .or_else(|| {
                crate::model::TransformKind::from_name(name).map(ButtonAction::Transform)
            })
    }

    /// True for actions that only edit the buffer.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            ButtonAction::Evaluate
                | ButtonAction::ToggleAngleMode
                | ButtonAction::ToggleSecond
                | ButtonAction::ClearHistory
                | ButtonAction::Transform(_)
        )
    }
}
