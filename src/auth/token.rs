//! The auth token stored in the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::user::UserID;

/// The token stored in the auth cookie that proves the user has logged in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The ID of the logged-in user.
    pub user_id: UserID,
    /// When the token stops being valid.
    #[serde(with = "datetime_format")]
    pub expires_at: OffsetDateTime,
}

mod datetime_format {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] \
        [offset_hour sign:mandatory]:[offset_minute]:[offset_second]"
    );

    pub fn serialize<S: Serializer>(
        date_time: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = date_time
            .format(FORMAT)
            .map_err(|error| serde::ser::Error::custom(error.to_string()))?;

        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let date_time_string = String::deserialize(deserializer)?;

        OffsetDateTime::parse(&date_time_string, FORMAT)
            .map_err(|error| D::Error::custom(error.to_string()))
    }
}
