use std::fmt;

use serde::de::Visitor;
use serde::{Deserialize, Serialize, Serializer};

/// An enum to represent all different value types that can appear as
/// a cell in a worksheet grid
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Signed integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
    /// Boolean
    Bool(bool),
    /// Empty cell
    #[default]
    Empty,
}

impl CellValue {
    /// Assess if the cell is empty
    pub fn is_empty(&self) -> bool {
        *self == CellValue::Empty
    }

    /// Assess if the cell holds an integer
    pub fn is_int(&self) -> bool {
        matches!(*self, CellValue::Int(_))
    }

    /// Assess if the cell holds a float
    pub fn is_float(&self) -> bool {
        matches!(*self, CellValue::Float(_))
    }

    /// Assess if the cell holds a boolean
    pub fn is_bool(&self) -> bool {
        matches!(*self, CellValue::Bool(_))
    }

    /// Assess if the cell holds a string
    pub fn is_string(&self) -> bool {
        matches!(*self, CellValue::String(_))
    }

    /// Gets the integer value, if the cell holds one
    pub fn get_int(&self) -> Option<i64> {
        if let CellValue::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Gets the float value, if the cell holds one
    pub fn get_float(&self) -> Option<f64> {
        if let CellValue::Float(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Gets the boolean value, if the cell holds one
    pub fn get_bool(&self) -> Option<bool> {
        if let CellValue::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Gets the string value, if the cell holds one
    pub fn get_string(&self) -> Option<&str> {
        if let CellValue::String(v) = self {
            Some(&**v)
        } else {
            None
        }
    }

    /// Gets a string representation of ints, floats and strings
    pub fn as_string(&self) -> Option<String> {
        match self {
            CellValue::Float(v) => Some(v.to_string()),
            CellValue::Int(v) => Some(v.to_string()),
            CellValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Gets an integer rendition of the cell, converting where possible
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            CellValue::Float(v) => Some(*v as i64),
            CellValue::Bool(v) => Some(*v as i64),
            CellValue::String(v) => v.parse::<i64>().ok(),
            CellValue::Empty => None,
        }
    }

    /// Gets a float rendition of the cell, converting where possible
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Bool(v) => Some((*v as i32).into()),
            CellValue::String(v) => v.parse::<f64>().ok(),
            CellValue::Empty => None,
        }
    }
}

impl PartialEq<&str> for CellValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(*self, CellValue::String(ref s) if s == other)
    }
}

impl PartialEq<str> for CellValue {
    fn eq(&self, other: &str) -> bool {
        matches!(*self, CellValue::String(ref s) if s == other)
    }
}

impl PartialEq<f64> for CellValue {
    fn eq(&self, other: &f64) -> bool {
        matches!(*self, CellValue::Float(ref s) if *s == *other)
    }
}

impl PartialEq<bool> for CellValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(*self, CellValue::Bool(ref s) if *s == *other)
    }
}

impl PartialEq<i64> for CellValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(*self, CellValue::Int(ref s) if *s == *other)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        match *self {
            CellValue::Int(ref e) => write!(f, "{}", e),
            CellValue::Float(ref e) => write!(f, "{}", e),
            CellValue::String(ref e) => write!(f, "{}", e),
            CellValue::Bool(ref e) => write!(f, "{}", e),
            CellValue::Empty => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            CellValue::Int(v) => serializer.serialize_i64(v),
            CellValue::Float(v) => serializer.serialize_f64(v),
            CellValue::String(ref v) => serializer.serialize_str(v),
            CellValue::Bool(v) => serializer.serialize_bool(v),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<CellValue, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CellValueVisitor;

        impl<'de> Visitor<'de> for CellValueVisitor {
            type Value = CellValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("any valid cell value")
            }

            #[inline]
            fn visit_bool<E>(self, value: bool) -> Result<CellValue, E> {
                Ok(CellValue::Bool(value))
            }

            #[inline]
            fn visit_i64<E>(self, value: i64) -> Result<CellValue, E> {
                Ok(CellValue::Int(value))
            }

            #[inline]
            fn visit_u64<E>(self, value: u64) -> Result<CellValue, E> {
                Ok(CellValue::Int(value as i64))
            }

            #[inline]
            fn visit_f64<E>(self, value: f64) -> Result<CellValue, E> {
                Ok(CellValue::Float(value))
            }

            #[inline]
            fn visit_str<E>(self, value: &str) -> Result<CellValue, E>
            where
                E: serde::de::Error,
            {
                self.visit_string(String::from(value))
            }

            #[inline]
            fn visit_string<E>(self, value: String) -> Result<CellValue, E> {
                Ok(CellValue::String(value))
            }

            #[inline]
            fn visit_none<E>(self) -> Result<CellValue, E> {
                Ok(CellValue::Empty)
            }

            #[inline]
            fn visit_some<D>(self, deserializer: D) -> Result<CellValue, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            #[inline]
            fn visit_unit<E>(self) -> Result<CellValue, E> {
                Ok(CellValue::Empty)
            }
        }

        deserializer.deserialize_any(CellValueVisitor)
    }
}

macro_rules! define_from {
    ($variant:path, $ty:ty) => {
        impl From<$ty> for CellValue {
            fn from(v: $ty) -> Self {
                $variant(v)
            }
        }
    };
}

define_from!(CellValue::Int, i64);
define_from!(CellValue::Float, f64);
define_from!(CellValue::String, String);
define_from!(CellValue::Bool, bool);

impl<'a> From<&'a str> for CellValue {
    fn from(v: &'a str) -> Self {
        CellValue::String(String::from(v))
    }
}

impl From<()> for CellValue {
    fn from(_: ()) -> Self {
        CellValue::Empty
    }
}

impl<T> From<Option<T>> for CellValue
where
    CellValue: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => From::from(v),
            None => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CellValue;

    #[test]
    fn conversions() {
        assert_eq!(CellValue::Int(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::String("1.2".to_string()).as_f64(), Some(1.2));
        assert_eq!(CellValue::Bool(true).as_i64(), Some(1));
        assert_eq!(CellValue::Float(2.5).as_string(), Some("2.5".to_string()));
        assert_eq!(CellValue::Empty.as_f64(), None);
        assert_eq!(CellValue::Empty.as_string(), None);
    }

    #[test]
    fn equality_against_primitives() {
        assert_eq!(CellValue::String("a".to_string()), "a");
        assert_eq!(CellValue::Float(1.5), 1.5);
        assert_eq!(CellValue::Int(3), 3);
        assert_eq!(CellValue::Bool(false), false);
        // no coercion between numeric variants
        assert_ne!(CellValue::Int(1), CellValue::Float(1.0));
    }

    #[test]
    fn display() {
        assert_eq!(CellValue::String("x".to_string()).to_string(), "x");
        assert_eq!(CellValue::Int(-4).to_string(), "-4");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn serde_round_trip() {
        let row = vec![
            CellValue::Int(1),
            CellValue::Float(2.5),
            CellValue::String("x".to_string()),
            CellValue::Bool(true),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[1,2.5,"x",true,null]"#);
        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn from_impls() {
        assert_eq!(CellValue::from(3i64), CellValue::Int(3));
        assert_eq!(CellValue::from("a"), CellValue::String("a".to_string()));
        assert_eq!(CellValue::from(()), CellValue::Empty);
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(1.5f64)), CellValue::Float(1.5));
    }
}
