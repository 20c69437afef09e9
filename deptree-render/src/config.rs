use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Output format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// A LaTeX document with one TikZ picture per sentence.
    Latex,

    /// One Graphviz DOT graph per sentence.
    Graphviz,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Graphviz
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latex" => Ok(Mode::Latex),
            "graphviz" => Ok(Mode::Graphviz),
            _ => Err(ConfigError::UnknownMode {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Latex => write!(f, "latex"),
            Mode::Graphviz => write!(f, "graphviz"),
        }
    }
}

/// Placement of the relation label along an edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelPosition {
    /// Near the head end of the edge.
    Head,

    /// Halfway the edge.
    Middle,

    /// Near the dependent end of the edge.
    Dependent,
}

impl Default for LabelPosition {
    fn default() -> Self {
        LabelPosition::Middle
    }
}

impl FromStr for LabelPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(LabelPosition::Head),
            "middle" => Ok(LabelPosition::Middle),
            "dependent" => Ok(LabelPosition::Dependent),
            _ => Err(ConfigError::UnknownLabelPosition {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for LabelPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LabelPosition::Head => write!(f, "head"),
            LabelPosition::Middle => write!(f, "middle"),
            LabelPosition::Dependent => write!(f, "dependent"),
        }
    }
}

/// Rendering options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenderConfig {
    /// The renderer to use.
    pub mode: Mode,

    /// Reduce the spacing between nodes.
    pub compact: bool,

    /// Add the morphological features of a token to its node.
    pub show_features: bool,

    /// Where relation labels are placed on edges.
    pub label_position: LabelPosition,
}

impl RenderConfig {
    pub fn new(mode: Mode) -> Self {
        RenderConfig {
            mode,
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelPosition, Mode, RenderConfig};
    use crate::error::ConfigError;

    #[test]
    fn parse_mode() {
        assert_eq!("latex".parse::<Mode>(), Ok(Mode::Latex));
        assert_eq!("graphviz".parse::<Mode>(), Ok(Mode::Graphviz));
        assert_eq!(
            "svg".parse::<Mode>(),
            Err(ConfigError::UnknownMode {
                value: "svg".to_string()
            })
        );
    }

    #[test]
    fn parse_label_position() {
        for position in &[
            LabelPosition::Head,
            LabelPosition::Middle,
            LabelPosition::Dependent,
        ] {
            assert_eq!(position.to_string().parse::<LabelPosition>(), Ok(*position));
        }

        assert!("above".parse::<LabelPosition>().is_err());
    }

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.mode, Mode::Graphviz);
        assert_eq!(config.label_position, LabelPosition::Middle);
        assert!(!config.compact);
        assert!(!config.show_features);
        assert_eq!(RenderConfig::new(Mode::Latex).mode, Mode::Latex);
    }
}
