use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

fn check_email(email: &str) -> Result<(), String> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(format!("Invalid email: {:?}", email)),
    }
}

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: UserCreate) -> Result<Self, String> {
        check_email(&payload.email)?;
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            role: payload.role,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            check_email(&email)?;
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_email_is_validated_on_create_and_update() {
        let payload = UserCreate { name: "Dana".into(), email: "dana".into(), role: Role::Customer };
        assert!(User::from_create("user_1".into(), payload).is_err());

        let mut user = User::new("user_1", "Dana", "dana@example.com");
        assert!(user.on_update(UserPatch { email: Some("@x".into()), ..Default::default() }).is_err());
        user.on_update(UserPatch { role: Some(Role::Admin), ..Default::default() }).unwrap();
        assert!(user.is_admin());
    }
}
