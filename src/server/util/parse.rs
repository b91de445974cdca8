use std::str::FromStr;

use crate::{
    model::UnknownVariant,
    server::error::{internal::InternalError, AppError},
};

/// Parses a stored status or kind column into its enum.
///
/// # Arguments
/// - `value` - The stored string, e.g. `"pending"`
///
/// # Returns
/// - `Ok(T)` - Successfully parsed enum variant
/// - `Err(AppError::InternalErr(ParseEnum))` - No variant matches the stored value
pub fn parse_enum<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = UnknownVariant>,
{
    let result = value.parse::<T>().map_err(InternalError::from)?;

    Ok(result)
}

/// Decodes a JSON column holding an array of ids.
pub fn parse_id_list(value: serde_json::Value) -> Result<Vec<i32>, AppError> {
    let ids = serde_json::from_value(value).map_err(InternalError::from)?;

    Ok(ids)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::order::OrderStatus;

    #[test]
    fn parses_known_value() {
        let status: OrderStatus = parse_enum("confirmed").unwrap();

        assert_eq!(status, OrderStatus::Confirmed);
    }

    #[test]
    fn rejects_unknown_value() {
        let result = parse_enum::<OrderStatus>("lost");

        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseEnum { kind: "OrderStatus", .. }))
        ));
    }

    #[test]
    fn parses_id_list() {
        let ids = parse_id_list(serde_json::json!([3, 1, 2])).unwrap();

        assert_eq!(ids, vec![3, 1, 2]);
    }
}
