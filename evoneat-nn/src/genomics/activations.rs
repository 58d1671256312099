use super::UnknownActivation;

use serde::{Deserialize, Serialize};

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// An ActivationType represents the type
/// of activation function the node's network
/// equivalent will use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationType {
    // 1   if x > 0
    // 0   otherwise
    Step,
    // 1 / (1 + exp(-4.9x))
    Sigmoid,
    // tanh(x)
    Tanh,
    // max(0, x)
    ReLU,
    // x   if x > 0
    // x/100 otherwise
    LeakyReLU,
    // x          if x > 0
    // exp(x) - 1 otherwise
    Elu,
    // x
    Identity,
    // x / (1 + exp(-x))
    Swish,
    // exp(-x²)
    Gaussian,
    // sin(πx)
    Sinusoidal,
}

impl ActivationType {
    /// Every available activation type.
    pub const ALL: [ActivationType; 10] = [
        ActivationType::Step,
        ActivationType::Sigmoid,
        ActivationType::Tanh,
        ActivationType::ReLU,
        ActivationType::LeakyReLU,
        ActivationType::Elu,
        ActivationType::Identity,
        ActivationType::Swish,
        ActivationType::Gaussian,
        ActivationType::Sinusoidal,
    ];

    /// Returns the activation function itself.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::ActivationType;
    ///
    /// let relu = ActivationType::ReLU.function();
    ///
    /// assert_eq!(relu(-3.0), 0.0);
    /// assert_eq!(relu(2.0), 2.0);
    /// ```
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            Self::Step => step,
            Self::Sigmoid => sigmoid,
            Self::Tanh => f32::tanh,
            Self::ReLU => relu,
            Self::LeakyReLU => leaky_relu,
            Self::Elu => elu,
            Self::Identity => identity,
            Self::Swish => swish,
            Self::Gaussian => gaussian,
            Self::Sinusoidal => sinusoidal,
        }
    }

    /// Evaluates the activation function at `x`.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::Sigmoid.apply(0.0), 0.5);
    /// assert_eq!(ActivationType::Step.apply(0.3), 1.0);
    /// ```
    pub fn apply(self, x: f32) -> f32 {
        self.function()(x)
    }

    /// Looks up an activation type by name.
    /// Names are case-insensitive, and `"linear"`
    /// is accepted as an alias of `Identity`.
    ///
    /// # Errors
    /// Returns [`UnknownActivation`] if the name
    /// matches no activation type.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::resolve("tanh"), Ok(ActivationType::Tanh));
    /// assert_eq!(ActivationType::resolve("Linear"), Ok(ActivationType::Identity));
    /// assert!(ActivationType::resolve("softplus").is_err());
    /// ```
    pub fn resolve(name: &str) -> Result<ActivationType, UnknownActivation> {
        name.parse()
    }

    /// Returns the canonical name of the activation type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::ReLU => "relu",
            Self::LeakyReLU => "leaky_relu",
            Self::Elu => "elu",
            Self::Identity => "identity",
            Self::Swish => "swish",
            Self::Gaussian => "gaussian",
            Self::Sinusoidal => "sinusoidal",
        }
    }
}

impl FromStr for ActivationType {
    type Err = UnknownActivation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "step" => Ok(Self::Step),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "relu" => Ok(Self::ReLU),
            "leaky_relu" | "leakyrelu" => Ok(Self::LeakyReLU),
            "elu" => Ok(Self::Elu),
            "identity" | "linear" => Ok(Self::Identity),
            "swish" => Ok(Self::Swish),
            "gaussian" => Ok(Self::Gaussian),
            "sinusoidal" | "sin" => Ok(Self::Sinusoidal),
            _ => Err(UnknownActivation(s.to_owned())),
        }
    }
}

impl fmt::Display for ActivationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn step(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-4.9 * x).exp())
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn leaky_relu(x: f32) -> f32 {
    if x > 0.0 {
        x
    } else {
        0.01 * x
    }
}

fn elu(x: f32) -> f32 {
    if x > 0.0 {
        x
    } else {
        x.exp() - 1.0
    }
}

fn identity(x: f32) -> f32 {
    x
}

fn swish(x: f32) -> f32 {
    x / (1.0 + (-x).exp())
}

fn gaussian(x: f32) -> f32 {
    (-x * x).exp()
}

fn sinusoidal(x: f32) -> f32 {
    (PI * x).sin()
}
