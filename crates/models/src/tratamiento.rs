use std::fmt;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::Serialize;

use crate::errors::ModelError;

pub const CODIGO_MAX_LEN: usize = 8;
pub const NOMBRE_MAX_LEN: usize = 255;
pub const DESCRIPCION_MAX_LEN: usize = 255;
pub const FAMILIA_MAX_LEN: usize = 2;
/// `precio_base` is NUMERIC(5, 2): at most 999.99.
pub const PRECIO_MAX_DIGITS: u32 = 5;
pub const PRECIO_DECIMAL_PLACES: u32 = 2;

const CODIGO_TAKEN: &str = "tratamiento with this codigo already exists";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tratamiento")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub precio_base: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nombre)
    }
}

/// Every writable column of a treatment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TratamientoData {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    pub precio_base: Decimal,
}

impl From<Model> for TratamientoData {
    fn from(m: Model) -> Self {
        Self {
            codigo: m.codigo,
            nombre: m.nombre,
            descripcion: m.descripcion,
            duracion_minutos: m.duracion_minutos,
            familia: m.familia,
            precio_base: m.precio_base,
        }
    }
}

impl TratamientoData {
    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            codigo: self.codigo,
            nombre: self.nombre,
            descripcion: self.descripcion,
            duracion_minutos: self.duracion_minutos,
            familia: self.familia,
            precio_base: self.precio_base,
        }
    }
}

fn check_len(field: &str, value: &str, max: usize, allow_blank: bool) -> Result<(), ModelError> {
    if !allow_blank && value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} longer than {max} characters")));
    }
    Ok(())
}

/// Integer and fractional digit counts of `d` as written: `47.500` has three
/// fractional digits. Leading zeros of a pure fraction do not count as
/// integer digits (`0.05` is `(0, 2)`), and zero itself is one digit.
pub fn decimal_digits(d: &Decimal) -> (u32, u32) {
    let scale = d.scale();
    let mantissa = d.mantissa().unsigned_abs();
    let digits = if mantissa == 0 { 1 } else { mantissa.to_string().len() as u32 };
    if scale == 0 {
        (digits, 0)
    } else {
        (digits.saturating_sub(scale), scale)
    }
}

pub fn validate_precio_base(d: &Decimal) -> Result<(), ModelError> {
    let (whole, decimals) = decimal_digits(d);
    if decimals > PRECIO_DECIMAL_PLACES {
        return Err(ModelError::Validation(format!("precio_base allows at most {PRECIO_DECIMAL_PLACES} decimal places")));
    }
    if whole > PRECIO_MAX_DIGITS - PRECIO_DECIMAL_PLACES {
        return Err(ModelError::Validation(format!("precio_base allows at most {PRECIO_MAX_DIGITS} digits")));
    }
    Ok(())
}

pub fn validate(data: &TratamientoData) -> Result<(), ModelError> {
    check_len("codigo", &data.codigo, CODIGO_MAX_LEN, false)?;
    check_len("nombre", &data.nombre, NOMBRE_MAX_LEN, false)?;
    check_len("descripcion", &data.descripcion, DESCRIPCION_MAX_LEN, false)?;
    if let Some(f) = &data.familia {
        check_len("familia", f, FAMILIA_MAX_LEN, true)?;
    }
    validate_precio_base(&data.precio_base)
}

pub async fn create(db: &DatabaseConnection, data: TratamientoData) -> Result<Model, ModelError> {
    validate(&data)?;
    let am = ActiveModel {
        codigo: Set(data.codigo),
        nombre: Set(data.nombre),
        descripcion: Set(data.descripcion),
        duracion_minutos: Set(data.duracion_minutos),
        familia: Set(data.familia),
        precio_base: Set(data.precio_base),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, CODIGO_TAKEN))
}

/// Replace all writable columns of row `id`; `None` when the row is gone.
pub async fn replace(db: &DatabaseConnection, id: i32, data: TratamientoData) -> Result<Option<Model>, ModelError> {
    validate(&data)?;
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    am.codigo = Set(data.codigo);
    am.nombre = Set(data.nombre);
    am.descripcion = Set(data.descripcion);
    am.duracion_minutos = Set(data.duracion_minutos);
    am.familia = Set(data.familia);
    am.precio_base = Set(data.precio_base);
    let updated = am.update(db).await.map_err(|e| ModelError::from_db(e, CODIGO_TAKEN))?;
    Ok(Some(updated))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_codigo(db: &DatabaseConnection, codigo: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Codigo.eq(codigo)).one(db).await?)
}

/// All treatments, newest first.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_desc(Column::Id).all(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> TratamientoData {
        TratamientoData {
            codigo: "1234".into(),
            nombre: "tratamiento ejemplo".into(),
            descripcion: "Tratamiento de test para probar su creación".into(),
            duracion_minutos: 90,
            familia: Some("1".into()),
            precio_base: Decimal::from_str("47.50").unwrap(),
        }
    }

    #[test]
    fn display_is_nombre() {
        let m = sample().into_model(1);
        assert_eq!(m.to_string(), "tratamiento ejemplo");
    }

    #[test]
    fn digit_counting() {
        assert_eq!(decimal_digits(&Decimal::from_str("47.50").unwrap()), (2, 2));
        assert_eq!(decimal_digits(&Decimal::from_str("999.99").unwrap()), (3, 2));
        assert_eq!(decimal_digits(&Decimal::from_str("0.05").unwrap()), (0, 2));
        assert_eq!(decimal_digits(&Decimal::from_str("1000").unwrap()), (4, 0));
        assert_eq!(decimal_digits(&Decimal::from_str("0").unwrap()), (1, 0));
        assert_eq!(decimal_digits(&Decimal::from_str("0.00").unwrap()), (0, 2));
    }

    #[test]
    fn trailing_zeros_count_as_digits() {
        assert_eq!(decimal_digits(&Decimal::from_str("47.500").unwrap()), (2, 3));
        assert_eq!(decimal_digits(&Decimal::from_str("100.000").unwrap()), (3, 3));
        assert!(validate_precio_base(&Decimal::from_str("47.500").unwrap()).is_err());
    }

    #[test]
    fn precio_bounds() {
        assert!(validate_precio_base(&Decimal::from_str("999.99").unwrap()).is_ok());
        assert!(validate_precio_base(&Decimal::from_str("1000").unwrap()).is_err());
        assert!(validate_precio_base(&Decimal::from_str("1.234").unwrap()).is_err());
    }

    #[test]
    fn validation_limits() {
        assert!(validate(&sample()).is_ok());
        let long_code = TratamientoData { codigo: "ABCDEFGHI".into(), ..sample() };
        assert!(matches!(validate(&long_code), Err(ModelError::Validation(_))));
        let blank_name = TratamientoData { nombre: "  ".into(), ..sample() };
        assert!(validate(&blank_name).is_err());
        let empty_family = TratamientoData { familia: Some(String::new()), ..sample() };
        assert!(validate(&empty_family).is_ok());
        let long_family = TratamientoData { familia: Some("ABC".into()), ..sample() };
        assert!(validate(&long_family).is_err());
    }
}
