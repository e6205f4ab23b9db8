use crate::model::User;
use crate::screens::users::state::UserCriteria;

pub fn filter_users(items: &[User], criteria: &UserCriteria) -> Vec<User> {
    let needle = criteria.search.trim().to_lowercase();
    items
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.username.to_lowercase().contains(&needle)
                || u.full_name().to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle)
        })
        .filter(|u| criteria.roles.is_empty() || criteria.roles.iter().any(|r| u.has_role(r)))
        .filter(|u| criteria.status.matches(u.active))
        .cloned()
        .collect()
}
