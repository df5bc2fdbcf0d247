//! Lookup keys for captured values.

use crate::matcher::Matcha;

/// Something a capture can be looked up by: a placeholder name or a
/// position.
///
/// Negative positions are never in range.
pub trait CaptureKey {
    fn lookup<'m>(&self, matcha: &'m Matcha) -> Option<&'m str>;
}

impl CaptureKey for &str {
    fn lookup<'m>(&self, matcha: &'m Matcha) -> Option<&'m str> {
        matcha.value_of(self)
    }
}

impl CaptureKey for String {
    fn lookup<'m>(&self, matcha: &'m Matcha) -> Option<&'m str> {
        matcha.value_of(self)
    }
}

impl CaptureKey for usize {
    fn lookup<'m>(&self, matcha: &'m Matcha) -> Option<&'m str> {
        matcha.value_at(*self)
    }
}

macro_rules! signed_capture_key {
    ($($ty:ty),*) => {
        $(
            impl CaptureKey for $ty {
                fn lookup<'m>(&self, matcha: &'m Matcha) -> Option<&'m str> {
                    usize::try_from(*self).ok().and_then(|index| matcha.value_at(index))
                }
            }
        )*
    };
}

signed_capture_key!(i32, i64, isize);
