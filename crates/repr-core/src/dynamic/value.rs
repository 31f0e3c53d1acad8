use std::fmt;
use std::sync::Arc;

use crate::truthy::Truthy;

/// Anything that can live in a dynamic attribute.
pub trait DynValue: fmt::Debug + Truthy + Send + Sync {
    fn as_debug(&self) -> &dyn fmt::Debug;
}

impl<T: fmt::Debug + Truthy + Send + Sync> DynValue for T {
    fn as_debug(&self) -> &dyn fmt::Debug {
        self
    }
}

/// Shared, immutable attribute value.
#[derive(Clone)]
pub struct Value(Arc<dyn DynValue>);

impl Value {
    pub fn new(value: impl DynValue + 'static) -> Self {
        Self(Arc::new(value))
    }

    pub fn as_debug(&self) -> &dyn fmt::Debug {
        self.0.as_debug()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_debug(), f)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        self.0.is_truthy()
    }
}

macro_rules! impl_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new(value)
                }
            }
        )*
    };
}

impl_value_from!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(value.to_string())
    }
}

impl<T: DynValue + 'static> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::new(value)
    }
}

impl<T: DynValue + 'static> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::new(value)
    }
}

/// Placeholder returned when a callable member is read off an instance.
#[derive(Clone)]
pub(crate) struct BoundMember {
    pub(crate) type_name: String,
    pub(crate) name: String,
    pub(crate) kind: &'static str,
}

impl fmt::Debug for BoundMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}.{}>", self.kind, self.type_name, self.name)
    }
}

impl Truthy for BoundMember {
    fn is_truthy(&self) -> bool {
        true
    }
}
