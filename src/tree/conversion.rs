// Author: Dustin Pilgrim
// License: MIT

use crate::ConfError;

use super::data::{Data, DataKind};

/// Types a [`Data`] scalar can be read as.
pub trait FromData: Sized {
    fn from_data(data: &Data) -> Result<Self, ConfError>;
}

fn mismatch(data: &Data, target: &'static str) -> ConfError {
    ConfError::Type {
        text: data.text().to_string(),
        kind: data.kind(),
        target,
    }
}

impl FromData for String {
    fn from_data(data: &Data) -> Result<Self, ConfError> {
        match data.kind() {
            DataKind::String => Ok(unquote(data.text()).to_string()),
            DataKind::Integer | DataKind::Double => Ok(data.text().to_string()),
            DataKind::None => Err(mismatch(data, "String")),
        }
    }
}

/// Strip the delimiting quotes of a string lexeme. Escapes are left as is.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

macro_rules! integer_from_data {
    ($($ty:ty),*) => {
        $(
            impl FromData for $ty {
                fn from_data(data: &Data) -> Result<Self, ConfError> {
                    match data.kind() {
                        DataKind::Integer => data
                            .text()
                            .parse::<$ty>()
                            .map_err(|_| mismatch(data, stringify!($ty))),
                        _ => Err(mismatch(data, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

integer_from_data!(i32, i64, u16, u32, u64, usize);

macro_rules! float_from_data {
    ($($ty:ty),*) => {
        $(
            impl FromData for $ty {
                fn from_data(data: &Data) -> Result<Self, ConfError> {
                    match data.kind() {
                        DataKind::Integer | DataKind::Double => data
                            .text()
                            .parse::<$ty>()
                            .map_err(|_| mismatch(data, stringify!($ty))),
                        _ => Err(mismatch(data, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

float_from_data!(f32, f64);

impl FromData for Data {
    fn from_data(data: &Data) -> Result<Self, ConfError> {
        Ok(data.clone())
    }
}
