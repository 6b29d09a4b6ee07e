//! Symbolic transforms requested from the math engine.

use std::fmt;

/// Which transform a button or command asks for, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Factor into irreducible parts.
    Factor,
    /// Multiply out products and powers.
    Expand,
    /// Rewrite in a simpler form.
    Simplify,
    /// Solve an equation for a variable.
    Solve,
    /// Derivative.
    Differentiate,
    /// Integral.
    Integrate,
    /// Limit at a point.
    Limit,
    /// Taylor series around a point.
    Series,
}

impl TransformKind {
    /// All kinds, in button order.
    pub const ALL: [TransformKind; 8] = [
        TransformKind::Factor,
        TransformKind::Expand,
        TransformKind::Simplify,
        TransformKind::Solve,
        TransformKind::Differentiate,
        TransformKind::Integrate,
        TransformKind::Limit,
        TransformKind::Series,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Factor => "factor",
            TransformKind::Expand => "expand",
            TransformKind::Simplify => "simplify",
            TransformKind::Solve => "solve",
            TransformKind::Differentiate => "diff",
            TransformKind::Integrate => "integrate",
            TransformKind::Limit => "limit",
            TransformKind::Series => "series",
        }
    }

    /// Look up a kind by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The transform with default parameters: variable `x`, point `0`,
    /// first derivative, indefinite integral, series to order 6.
    pub fn with_defaults(self) -> Transform {
        let variable = DEFAULT_VARIABLE.to_string();
        match self {
            TransformKind::Factor => Transform::Factor,
            TransformKind::Expand => Transform::Expand,
            TransformKind::Simplify => Transform::Simplify,
            TransformKind::Solve => Transform::Solve { variable },
            TransformKind::Differentiate => Transform::Differentiate { variable, order: 1 },
            TransformKind::Integrate => Transform::Integrate {
                variable,
                bounds: None,
            },
            TransformKind::Limit => Transform::Limit {
                variable,
                point: "0".to_string(),
            },
            TransformKind::Series => Transform::Series {
                variable,
                point: "0".to_string(),
                order: 6,
            },
        }
    }
}

const DEFAULT_VARIABLE: &str = "x";

/// A transform with its parameters.
///
/// Parameters stay textual: the engine decides how to parse points and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Factor into irreducible parts.
    Factor,
    /// Multiply out products and powers.
    Expand,
    /// Rewrite in a simpler form.
    Simplify,
    /// Solve an equation for a variable.
    Solve {
        /// Unknown to solve for.
        variable: String,
    },
    /// Derivative.
    Differentiate {
        /// Variable to differentiate by.
        variable: String,
        /// Derivative order, at least 1.
        order: u32,
    },
    /// Integral.
    Integrate {
        /// Integration variable.
        variable: String,
        /// Definite integral bounds `(lower, upper)`; `None` for indefinite.
        bounds: Option<(String, String)>,
    },
    /// Limit at a point.
    Limit {
        /// Variable approaching the point.
        variable: String,
        /// Point the variable approaches.
        point: String,
    },
    /// Taylor series around a point.
    Series {
        /// Expansion variable.
        variable: String,
        /// Point the series is expanded around.
        point: String,
        /// Highest power kept.
        order: u32,
    },
}

impl Transform {
    /// The kind of this transform, without parameters.
    pub fn kind(&self) -> TransformKind {
        match self {
            Transform::Factor => TransformKind::Factor,
            Transform::Expand => TransformKind::Expand,
            Transform::Simplify => TransformKind::Simplify,
            Transform::Solve { .. } => TransformKind::Solve,
            Transform::Differentiate { .. } => TransformKind::Differentiate,
            Transform::Integrate { .. } => TransformKind::Integrate,
            Transform::Limit { .. } => TransformKind::Limit,
            Transform::Series { .. } => TransformKind::Series,
        }
    }

    /// Command name, e.g. `diff`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// History label for applying this transform to `input`,
    /// e.g. `diff(x^2, x)` or `integrate(x, x, 0, 1)`.
    pub fn label_for(&self, input: &str) -> String {
        match self {
            Transform::Factor | Transform::Expand | Transform::Simplify => {
                format!("{}({})", self.name(), input)
            }
            Transform::Solve { variable } => format!("solve({input}, {variable})"),
            Transform::Differentiate { variable, order: 1 } => {
                format!("diff({input}, {variable})")
            }
            Transform::Differentiate { variable, order } => {
                format!("diff({input}, {variable}, {order})")
            }
            Transform::Integrate {
                variable,
                bounds: None,
            } => format!("integrate({input}, {variable})"),
            Transform::Integrate {
                variable,
                bounds: Some((lo, hi)),
            } => format!("integrate({input}, {variable}, {lo}, {hi})"),
            Transform::Limit { variable, point } => {
                format!("limit({input}, {variable}, {point})")
            }
            Transform::Series {
                variable,
                point,
                order,
            } => format!("series({input}, {variable}, {point}, {order})"),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
