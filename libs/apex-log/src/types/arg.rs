use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single log argument, classified before it reaches the emitter.
///
/// Primitives are written as-is. `Structured` values are the only ones
/// affected by JSON formatting mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Structured(Value),
    /// A value whose serialization failed while it was being classified.
    Unserializable(String),
}

impl Arg {
    /// Classify any serializable value. Scalars become primitives, arrays
    /// and objects stay structured.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Arg::from(value),
            Err(e) => {
                tracing::warn!("log argument is not serializable: {}", e);
                Arg::Unserializable(e.to_string())
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Arg::Structured(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => f.write_str("null"),
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::Int(i) => write!(f, "{i}"),
            Arg::UInt(u) => write!(f, "{u}"),
            Arg::Float(n) => write!(f, "{n}"),
            Arg::Str(s) => f.write_str(s),
            Arg::Structured(value) => write!(f, "{value}"),
            Arg::Unserializable(reason) => write!(f, "<unserializable: {reason}>"),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Arg::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Arg::UInt(u)
                } else {
                    Arg::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Arg::Str(s),
            value @ (Value::Array(_) | Value::Object(_)) => Arg::Structured(value),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Str(s.clone())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<f32> for Arg {
    fn from(n: f32) -> Self {
        Arg::Float(n.into())
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Float(n)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Null, Into::into)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $target:ty => $($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(n: $ty) -> Self {
                    Arg::$variant(n as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int: i64 => i8, i16, i32, i64, isize);
impl_from_int!(UInt: u64 => u8, u16, u32, u64, usize);

/// Payloads that can be logged as an argument list without giving them up.
pub trait ToArgs {
    fn to_args(&self) -> Vec<Arg>;
}

impl ToArgs for () {
    fn to_args(&self) -> Vec<Arg> {
        Vec::new()
    }
}

impl<T: Clone + Into<Arg>> ToArgs for Vec<T> {
    fn to_args(&self) -> Vec<Arg> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Clone + Into<Arg>> ToArgs for [T] {
    fn to_args(&self) -> Vec<Arg> {
        self.iter().cloned().map(Into::into).collect()
    }
}

macro_rules! impl_to_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: Clone + Into<Arg>),+> ToArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_args(&self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.clone().into()),+]
            }
        }
    };
}

impl_to_args_tuple!(A);
impl_to_args_tuple!(A, B);
impl_to_args_tuple!(A, B, C);
impl_to_args_tuple!(A, B, C, D);
impl_to_args_tuple!(A, B, C, D, E);
impl_to_args_tuple!(A, B, C, D, E, F);
