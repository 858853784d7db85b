//! CSV rendering of the users collection: fixed `id,username,email` header,
//! one row per record.

use anyhow::Context;

use crate::http::envelope::UserResource;

pub const CSV_HEADER: [&str; 3] = ["id", "username", "email"];

pub fn users_to_csv(users: &[UserResource]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).context("write csv header")?;
    for user in users {
        writer
            .write_record([user.id.to_string().as_str(), &user.username, &user.email])
            .context("write csv row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv writer: {}", e.error()))?;
    String::from_utf8(bytes).context("csv output was not utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: i64, username: &str, email: &str) -> UserResource {
        UserResource {
            id,
            username: username.into(),
            email: email.into(),
            links: Vec::new(),
        }
    }

    #[test]
    fn header_only_for_empty_collection() {
        let out = users_to_csv(&[]).unwrap();
        assert_eq!(out, "id,username,email\n");
    }

    #[test]
    fn row_count_matches_input_and_field_order_is_fixed() {
        let users = vec![
            resource(1, "alice", "alice@example.com"),
            resource(2, "bob", "bob@example.com"),
        ];
        let out = users_to_csv(&users).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), users.len() + 1);
        assert_eq!(lines[0], "id,username,email");
        assert_eq!(lines[1], "1,alice,alice@example.com");
        assert_eq!(lines[2], "2,bob,bob@example.com");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let users = vec![resource(3, "smith, jane", "jane@example.com")];
        let out = users_to_csv(&users).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "3,\"smith, jane\",jane@example.com");
    }
}
