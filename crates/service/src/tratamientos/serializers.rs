//! Treatment serializers.
//!
//! Two output shapes share one input validator: the summary omits
//! `descripcion`, the detail carries every column. Input arrives as a raw
//! JSON value so that type errors can be reported per field.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use models::tratamiento::{
    decimal_digits, TratamientoData, CODIGO_MAX_LEN, DESCRIPCION_MAX_LEN, FAMILIA_MAX_LEN,
    NOMBRE_MAX_LEN, PRECIO_DECIMAL_PLACES, PRECIO_MAX_DIGITS,
};

use crate::validation::{ValidationErrors, NON_FIELD_ERRORS};

use super::Tratamiento;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const CODIGO_TAKEN: &str = "tratamiento with this codigo already exists.";

/// Which representation an action renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerKind {
    Summary,
    Detail,
}

impl SerializerKind {
    pub fn represent(self, t: &Tratamiento) -> Representation {
        match self {
            SerializerKind::Summary => Representation::Summary(TratamientoSummary::from(t)),
            SerializerKind::Detail => Representation::Detail(TratamientoDetail::from(t)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TratamientoSummary {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    pub precio_base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TratamientoDetail {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    pub precio_base: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Representation {
    Summary(TratamientoSummary),
    Detail(TratamientoDetail),
}

impl Representation {
    pub fn id(&self) -> i32 {
        match self {
            Representation::Summary(s) => s.id,
            Representation::Detail(d) => d.id,
        }
    }
}

impl From<&Tratamiento> for TratamientoSummary {
    fn from(t: &Tratamiento) -> Self {
        Self {
            id: t.id,
            codigo: t.codigo.clone(),
            nombre: t.nombre.clone(),
            duracion_minutos: t.duracion_minutos,
            familia: t.familia.clone(),
            precio_base: format_precio(&t.precio_base),
        }
    }
}

impl From<&Tratamiento> for TratamientoDetail {
    fn from(t: &Tratamiento) -> Self {
        Self {
            id: t.id,
            codigo: t.codigo.clone(),
            nombre: t.nombre.clone(),
            duracion_minutos: t.duracion_minutos,
            familia: t.familia.clone(),
            precio_base: format_precio(&t.precio_base),
            descripcion: t.descripcion.clone(),
        }
    }
}

/// Fixed two-decimal rendering, e.g. `47.5` -> `"47.50"`.
pub fn format_precio(d: &Decimal) -> String {
    let mut d = d.round_dp(PRECIO_DECIMAL_PLACES);
    d.rescale(PRECIO_DECIMAL_PLACES);
    d.to_string()
}

/// The trimmed `codigo` a payload would write, if it carries a usable one.
/// Used to run the uniqueness lookup before validation.
pub fn candidate_codigo(payload: &Value) -> Option<String> {
    match payload.get("codigo")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_char(v: &Value, max: usize, allow_blank: bool) -> Result<String, String> {
    let text = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(NOT_NULL.into()),
        _ => return Err(INVALID_STRING.into()),
    };
    if text.is_empty() && !allow_blank {
        return Err(NOT_BLANK.into());
    }
    if text.chars().count() > max {
        return Err(format!("Ensure this field has no more than {max} characters."));
    }
    Ok(text)
}

fn parse_integer(v: &Value) -> Result<i32, String> {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Null => return Err(NOT_NULL.into()),
        _ => return Err(INVALID_INTEGER.into()),
    };
    let text = text.trim();
    // "30.0" and "30." are integers; "30.5" is not.
    let digits = match text.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
        Some(_) => return Err(INVALID_INTEGER.into()),
        None => text,
    };
    let n: i128 = digits.parse().map_err(|_| INVALID_INTEGER.to_string())?;
    if n > i32::MAX as i128 {
        return Err(format!("Ensure this value is less than or equal to {}.", i32::MAX));
    }
    if n < i32::MIN as i128 {
        return Err(format!("Ensure this value is greater than or equal to {}.", i32::MIN));
    }
    Ok(n as i32)
}

fn parse_precio(v: &Value) -> Result<Decimal, String> {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Null => return Err(NOT_NULL.into()),
        _ => return Err(INVALID_NUMBER.into()),
    };
    let value = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| INVALID_NUMBER.to_string())?;

    let (whole, places) = decimal_digits(&value);
    let max_whole = PRECIO_MAX_DIGITS - PRECIO_DECIMAL_PLACES;
    if whole + places > PRECIO_MAX_DIGITS {
        return Err(format!("Ensure that there are no more than {PRECIO_MAX_DIGITS} digits in total."));
    }
    if places > PRECIO_DECIMAL_PLACES {
        return Err(format!("Ensure that there are no more than {PRECIO_DECIMAL_PLACES} decimal places."));
    }
    if whole > max_whole {
        return Err(format!("Ensure that there are no more than {max_whole} digits before the decimal point."));
    }
    let mut value = value;
    value.rescale(PRECIO_DECIMAL_PLACES);
    Ok(value)
}

struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    require_all: bool,
    errors: ValidationErrors,
}

impl FieldReader<'_> {
    /// `Some` when the field was supplied and parsed; errors are collected.
    fn read<T>(&mut self, name: &str, required: bool, parse: impl FnOnce(&Value) -> Result<T, String>) -> Option<T> {
        match self.obj.get(name) {
            None => {
                if required && self.require_all {
                    self.errors.add(name, REQUIRED);
                }
                None
            }
            Some(v) => match parse(v) {
                Ok(value) => Some(value),
                Err(msg) => {
                    self.errors.add(name, msg);
                    None
                }
            },
        }
    }
}

/// Validate `payload` for a create (`instance == None`), a full update or a
/// partial update, returning the complete column set to persist.
///
/// `codigo_taken` is the result of the uniqueness lookup for the candidate
/// codigo; it only produces an error once that codigo is otherwise valid, so
/// it is reported together with the remaining field errors.
pub fn validate(
    payload: &Value,
    instance: Option<&Tratamiento>,
    partial: bool,
    codigo_taken: bool,
) -> Result<TratamientoData, ValidationErrors> {
    let Value::Object(obj) = payload else {
        return Err(ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!("Invalid data. Expected a dictionary, but got {}.", json_type(payload)),
        ));
    };

    let mut r = FieldReader { obj, require_all: !partial || instance.is_none(), errors: ValidationErrors::new() };
    let codigo = r.read("codigo", true, |v| parse_char(v, CODIGO_MAX_LEN, false));
    let nombre = r.read("nombre", true, |v| parse_char(v, NOMBRE_MAX_LEN, false));
    let descripcion = r.read("descripcion", true, |v| parse_char(v, DESCRIPCION_MAX_LEN, false));
    let duracion_minutos = r.read("duracion_minutos", true, parse_integer);
    let familia = r.read("familia", false, |v| match v {
        Value::Null => Ok(None),
        other => parse_char(other, FAMILIA_MAX_LEN, true).map(Some),
    });
    let precio_base = r.read("precio_base", true, parse_precio);

    let mut errors = r.errors;
    if codigo.is_some() && codigo_taken {
        errors.add("codigo", CODIGO_TAKEN);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    match instance.cloned().map(TratamientoData::from) {
        Some(base) => Ok(TratamientoData {
            codigo: codigo.unwrap_or(base.codigo),
            nombre: nombre.unwrap_or(base.nombre),
            descripcion: descripcion.unwrap_or(base.descripcion),
            duracion_minutos: duracion_minutos.unwrap_or(base.duracion_minutos),
            familia: familia.unwrap_or(base.familia),
            precio_base: precio_base.unwrap_or(base.precio_base),
        }),
        None => match (codigo, nombre, descripcion, duracion_minutos, precio_base) {
            (Some(codigo), Some(nombre), Some(descripcion), Some(duracion_minutos), Some(precio_base)) => {
                Ok(TratamientoData { codigo, nombre, descripcion, duracion_minutos, familia: familia.flatten(), precio_base })
            }
            _ => Err(ValidationErrors::single(NON_FIELD_ERRORS, REQUIRED)),
        },
    }
}
