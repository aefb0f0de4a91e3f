use std::collections::BTreeSet;

use join_api::v1::{lenient, SignUp, StorePath, User, ValidationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{store::Store, Result};

/// Registered users, keyed by their store key.
pub struct UserRepository<S> {
    store: S,
    users: Vec<(String, User)>,
}

impl<S: Store> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            users: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter().map(|(_, user)| user)
    }

    pub async fn list_users(&mut self) -> &[(String, User)] {
        let value = self.store.load(&StorePath::users()).await;

        self.users = (value.map(lenient::entries).unwrap_or_default().into_iter())
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(user) => Some((key, user)),
                Err(err) => {
                    warn!(%key, "skipping unreadable user: {err}");
                    None
                }
            })
            .collect();

        &self.users
    }

    /// Looks up a user by email, ignoring surrounding whitespace.
    pub fn find_by_email(&self, email: &str) -> Option<(&str, &User)> {
        let email = email.trim();

        (self.users.iter())
            .find(|(_, user)| user.email == email)
            .map(|(key, user)| (key.as_str(), user))
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Checks credentials against a fresh copy of the users.
    pub async fn authenticate(&mut self, email: &str, password: &str) -> Option<Session> {
        self.list_users().await;

        let (key, user) = self.find_by_email(email)?;

        if user.password != password.trim() {
            info!(%key, "rejected log-in");
            return None;
        }

        info!(%key, "logged in");
        Some(Session::logged_in(key, user))
    }

    /// Registers a new user with a colour taken from the pool.
    pub async fn sign_up(&mut self, form: SignUp) -> Result<User> {
        let profile = form.validate()?;

        self.list_users().await;
        if self.email_taken(&form.email) {
            return Err(ValidationError::EmailTaken(form.email.trim().to_owned()).into());
        }

        let color = ColorPool::new(&self.store).take().await;
        let user = form.into_user(profile, color);

        let created = (self.store)
            .post(&StorePath::users(), &serde_json::to_value(&user)?)
            .await;
        self.list_users().await;
        let created = created?;

        info!(key = ?created.get("name"), email = %user.email, "signed up");

        Ok(user)
    }
}

/// The pool of unused avatar colours.
///
/// Stored as `{ key: [colors] }`; only the first list is drawn from.
pub struct ColorPool<'a, S> {
    store: &'a S,
}

impl<'a, S: Store> ColorPool<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Removes a random colour from the pool. `None` when the pool is
    /// missing, empty, or cannot be written back.
    pub async fn take(&self) -> Option<String> {
        let pool = self.store.load(&StorePath::color_pool()).await?;
        let (key, colors) = lenient::entries(pool).into_iter().next()?;

        let mut colors = strings(colors);
        if colors.is_empty() {
            warn!(%key, "colour pool is exhausted");
            return None;
        }

        let index = rand::thread_rng().gen_range(0..colors.len());
        let color = colors.remove(index);

        let path = StorePath::color_pool().child(&key);
        match self.store.put(&path, &json!(colors)).await {
            Ok(_) => Some(color),
            Err(err) => {
                warn!(%key, "failed to update colour pool: {err}");
                None
            }
        }
    }

    /// Puts a colour back into the list at `key`. Returns `false` when
    /// there is no such list.
    pub async fn give_back(&self, key: &str, color: &str) -> Result<bool> {
        let path = StorePath::color_pool().child(key);

        let Some(colors) = self.store.load(&path).await else {
            warn!(%key, "no colour list to return to");
            return Ok(false);
        };

        let mut colors = strings(colors);
        colors.push(color.to_owned());
        self.store.put(&path, &json!(colors)).await?;

        Ok(true)
    }
}

fn strings(value: Value) -> Vec<String> {
    (lenient::entries(value).into_iter())
        .filter_map(|(_, value)| match value {
            Value::String(string) => Some(string),
            _ => None,
        })
        .collect()
}

/// Who is using the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub initials: Option<String>,
    pub guest: bool,
    pub sidebar_visible: bool,
    #[serde(default)]
    animations_shown: BTreeSet<String>,
}

impl Session {
    pub fn logged_in(user_id: &str, user: &User) -> Self {
        Self {
            user_id: Some(user_id.to_owned()),
            first_name: Some(user.firstname.clone()),
            last_name: Some(user.lastname.clone()),
            initials: Some(user.initials.clone()),
            sidebar_visible: true,
            ..Self::default()
        }
    }

    pub fn guest() -> Self {
        Self {
            guest: true,
            sidebar_visible: true,
            ..Self::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// `"First Last"`, or `"guest"` without a full name.
    pub fn greeting_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => String::from("guest"),
        }
    }

    /// Whether `animation` has yet to be shown, marking it as shown.
    pub fn first_showing(&mut self, animation: &str) -> bool {
        self.animations_shown.insert(animation.to_owned())
    }
}

/// Greeting for the hour of the day, `0..24`.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}
