//! Column type mapping.

use oxide_dialect::{DataType, Field};

/// Longest string size rendered with an explicit length.
const MAX_VARCHAR_SIZE: u32 = 4000;

/// Returns the Firebird column type for `field`.
///
/// `string_size` is the size given to an indexed or primary-key string
/// column that declares none.
pub(crate) fn data_type_of(field: &Field, string_size: u32) -> String {
    match field.data_type {
        DataType::Bool => "char".to_string(),
        DataType::Int | DataType::Uint => {
            let sql_type = match field.size {
                s if s < 16 => "smallint",
                s if s < 31 => "integer",
                _ => "bigint",
            };
            if field.auto_increment {
                format!("{sql_type} IDENTITY(1,1)")
            } else {
                sql_type.to_string()
            }
        }
        DataType::Float => "decimal".to_string(),
        DataType::String => {
            let mut size = field.size;
            if (field.primary_key || field.has_index()) && size == 0 {
                size = string_size;
            }
            if size > 0 && size <= MAX_VARCHAR_SIZE {
                format!("varchar({size})")
            } else {
                "varchar(MAX)".to_string()
            }
        }
        DataType::Time => "datetime".to_string(),
        DataType::Bytes => "varbinary(MAX)".to_string(),
        DataType::Custom(_) => "varchar".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(size: u32) -> Field {
        Field::new("n", DataType::Int).size(size)
    }

    fn string(size: u32) -> Field {
        Field::new("s", DataType::String).size(size)
    }

    #[test]
    fn test_integer_sizes() {
        assert_eq!(data_type_of(&int(0), 256), "smallint");
        assert_eq!(data_type_of(&int(8), 256), "smallint");
        assert_eq!(data_type_of(&int(15), 256), "smallint");
        assert_eq!(data_type_of(&int(16), 256), "integer");
        assert_eq!(data_type_of(&int(30), 256), "integer");
        assert_eq!(data_type_of(&int(31), 256), "bigint");
        assert_eq!(data_type_of(&int(32), 256), "bigint");
        assert_eq!(data_type_of(&int(64), 256), "bigint");
    }

    #[test]
    fn test_unsigned_matches_signed() {
        for size in [8, 16, 32, 64] {
            let unsigned = Field::new("n", DataType::Uint).size(size);
            assert_eq!(data_type_of(&unsigned, 256), data_type_of(&int(size), 256));
        }
    }

    #[test]
    fn test_auto_increment() {
        assert_eq!(
            data_type_of(&int(16).auto_increment(), 256),
            "integer IDENTITY(1,1)"
        );
        assert_eq!(
            data_type_of(&int(64).primary_key().auto_increment(), 256),
            "bigint IDENTITY(1,1)"
        );
        let rendered = data_type_of(&int(8).auto_increment(), 256);
        assert_eq!(rendered.matches("IDENTITY(1,1)").count(), 1);
    }

    #[test]
    fn test_string_sizes() {
        assert_eq!(data_type_of(&string(0), 256), "varchar(MAX)");
        assert_eq!(data_type_of(&string(1), 256), "varchar(1)");
        assert_eq!(data_type_of(&string(4000), 256), "varchar(4000)");
        assert_eq!(data_type_of(&string(4001), 256), "varchar(MAX)");
        assert_eq!(data_type_of(&string(5000), 256), "varchar(MAX)");
    }

    #[test]
    fn test_indexed_string_without_size() {
        assert_eq!(data_type_of(&string(0).primary_key(), 256), "varchar(256)");
        assert_eq!(data_type_of(&string(0).primary_key(), 50), "varchar(50)");
        assert_eq!(data_type_of(&string(0).indexed(), 256), "varchar(256)");
        assert_eq!(data_type_of(&string(0).unique(), 80), "varchar(80)");
        // A declared size wins over the configured one.
        assert_eq!(data_type_of(&string(20).primary_key(), 50), "varchar(20)");
    }

    #[test]
    fn test_indexed_string_default_above_limit() {
        assert_eq!(data_type_of(&string(0).indexed(), 8000), "varchar(MAX)");
    }

    #[test]
    fn test_other_types() {
        assert_eq!(data_type_of(&Field::new("b", DataType::Bool), 256), "char");
        assert_eq!(
            data_type_of(&Field::new("f", DataType::Float).size(64), 256),
            "decimal"
        );
        assert_eq!(data_type_of(&Field::new("t", DataType::Time), 256), "datetime");
        assert_eq!(
            data_type_of(&Field::new("b", DataType::Bytes), 256),
            "varbinary(MAX)"
        );
        assert_eq!(
            data_type_of(&Field::new("j", DataType::Custom("json".into())), 256),
            "varchar"
        );
    }
}
