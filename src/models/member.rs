use serde::{Deserialize, Serialize};

/// A team member as the backend returns it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Member {
    pub url: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub can_delete_user: bool,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn phone(&self) -> &str {
        self.phone_number.as_deref().unwrap_or("")
    }

    pub fn is_admin(&self) -> bool {
        self.can_delete_user
    }
}

/// Editable fields of the member forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl MemberField {
    pub const ALL: [MemberField; 4] = [
        MemberField::FirstName,
        MemberField::LastName,
        MemberField::Email,
        MemberField::PhoneNumber,
    ];

    /// Key used in field-error maps, matching the backend's field names.
    pub fn key(&self) -> &'static str {
        match self {
            MemberField::FirstName => crate::validation::FIRST_NAME,
            MemberField::LastName => crate::validation::LAST_NAME,
            MemberField::Email => crate::validation::EMAIL,
            MemberField::PhoneNumber => crate::validation::PHONE_NUMBER,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberField::FirstName => "First name",
            MemberField::LastName => "Last name",
            MemberField::Email => "Email",
            MemberField::PhoneNumber => "Phone number",
        }
    }
}

/// Form-side member record, sent as the body of create and update.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub can_delete_user: bool,
}

impl MemberDraft {
    pub fn field(&self, field: MemberField) -> &str {
        match field {
            MemberField::FirstName => &self.first_name,
            MemberField::LastName => &self.last_name,
            MemberField::Email => &self.email,
            MemberField::PhoneNumber => &self.phone_number,
        }
    }

    /// Username always follows email: the backend logs members in by email.
    pub fn set_field(&mut self, field: MemberField, value: String) {
        match field {
            MemberField::FirstName => self.first_name = value,
            MemberField::LastName => self.last_name = value,
            MemberField::Email => {
                self.username = value.clone();
                self.email = value;
            }
            MemberField::PhoneNumber => self.phone_number = value,
        }
    }

    pub fn push_char(&mut self, field: MemberField, ch: char) {
        let mut value = self.field(field).to_string();
        value.push(ch);
        self.set_field(field, value);
    }

    pub fn pop_char(&mut self, field: MemberField) {
        let mut value = self.field(field).to_string();
        value.pop();
        self.set_field(field, value);
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            username: member.username.clone(),
            email: member.email.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            phone_number: member.phone().to_string(),
            can_delete_user: member.can_delete_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            url: "http://localhost:8000/api/users/7/".to_string(),
            username: "ann@example.com".to_string(),
            email: "ann@example.com".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone_number: None,
            can_delete_user: true,
        }
    }

    #[test]
    fn test_setting_email_mirrors_username() {
        let mut draft = MemberDraft::default();
        draft.set_field(MemberField::Email, "new@example.com".to_string());
        assert_eq!(draft.email, "new@example.com");
        assert_eq!(draft.username, "new@example.com");
    }

    #[test]
    fn test_typing_into_email_keeps_username_in_step() {
        let mut draft = MemberDraft::from(&member());
        draft.pop_char(MemberField::Email);
        draft.push_char(MemberField::Email, 'g');
        assert_eq!(draft.email, "ann@example.cog");
        assert_eq!(draft.username, draft.email);
    }

    #[test]
    fn test_other_fields_leave_username_alone() {
        let mut draft = MemberDraft::from(&member());
        draft.set_field(MemberField::FirstName, "Anna".to_string());
        assert_eq!(draft.username, "ann@example.com");
        assert_eq!(draft.first_name, "Anna");
    }

    #[test]
    fn test_draft_from_member_treats_null_phone_as_empty() {
        let draft = MemberDraft::from(&member());
        assert_eq!(draft.phone_number, "");
        assert!(draft.can_delete_user);
    }

    #[test]
    fn test_member_deserializes_null_phone() {
        let json = r#"{
            "url": "http://localhost:8000/api/users/1/",
            "username": "a@b.com",
            "email": "a@b.com",
            "first_name": "A",
            "last_name": "B",
            "phone_number": null,
            "can_delete_user": false
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.phone(), "");
        assert_eq!(member.full_name(), "A B");
    }
}
