use crate::users::{password::hash_password, repo_types::NewUser};

const PLACEHOLDER_PASSWORD: &str = "password";

struct Band {
    name: &'static str,
    label: &'static str,
    genre: &'static str,
    location: &'static str,
    email: &'static str,
    phone: &'static str,
}

const BANDS: [Band; 3] = [
    Band {
        name: "Nirvana",
        label: "Sub Pop",
        genre: "Grunge",
        location: "Seattle, Washington",
        email: "nirvana@email.com",
        phone: "555-555-5555",
    },
    Band {
        name: "Rage Against the Machine",
        label: "Epic Records",
        genre: "Rap Metal",
        location: "Los Angeles, California",
        email: "ratm@email.com",
        phone: "555-555-55456",
    },
    Band {
        name: "The Cure",
        label: "Fiction Records",
        genre: "Post-Punk",
        location: "Crawley, West Sussex, England",
        email: "thecure@email.com",
        phone: "555-555-5557",
    },
];

/// Fixture bands, passwords hashed the same way the create endpoint does.
pub fn fixture_users() -> anyhow::Result<Vec<NewUser>> {
    BANDS
        .iter()
        .map(|b| {
            Ok(NewUser {
                band_name: Some(b.name.to_string()),
                label: Some(b.label.to_string()),
                genre: Some(b.genre.to_string()),
                location: Some(b.location.to_string()),
                contact_email: b.email.to_string(),
                contact_phone: Some(b.phone.to_string()),
                password_hash: hash_password(PLACEHOLDER_PASSWORD)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::users::password::verify_password;

    #[test]
    fn three_bands_with_unique_emails() {
        let users = fixture_users().expect("fixtures");
        assert_eq!(users.len(), 3);
        let emails: HashSet<_> = users.iter().map(|u| u.contact_email.as_str()).collect();
        assert_eq!(emails.len(), 3);
        assert_eq!(users[0].band_name.as_deref(), Some("Nirvana"));
    }

    #[test]
    fn fixture_passwords_are_hashed() {
        for user in fixture_users().expect("fixtures") {
            assert_ne!(user.password_hash, PLACEHOLDER_PASSWORD);
            assert!(verify_password(PLACEHOLDER_PASSWORD, &user.password_hash).unwrap());
        }
    }
}
