//! Multipart form parsing and field validation for artist and artwork forms.

use std::collections::{BTreeMap, HashMap};

use axum::{body::Bytes, extract::Multipart};

use crate::db::entities::{art, artist};
use crate::error::Result;

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased file extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Text fields and files of a `multipart/form-data` body
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;

                    // Browsers submit an empty part for an untouched file input
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }

                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Field value with surrounding whitespace stripped; empty when absent
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// Field value exactly as submitted
    pub fn raw(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Per-field validation messages, keyed by field name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Whether a form creates a record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

fn check_text(errors: &mut FormErrors, field: &'static str, value: &str, max_len: Option<usize>) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }

    if let Some(max) = max_len {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    max, len
                ),
            );
        }
    }
}

fn check_image(
    errors: &mut FormErrors,
    field: &'static str,
    file: Option<&UploadedFile>,
    required: bool,
) {
    let Some(file) = file else {
        if required {
            errors.add(field, REQUIRED);
        }
        return;
    };

    if file.bytes.is_empty() {
        errors.add(field, "The submitted file is empty.");
        return;
    }

    let allowed = file
        .extension()
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    if !allowed {
        errors.add(
            field,
            format!(
                "Upload a valid image. Allowed extensions are: {}.",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ),
        );
    }
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    !local.is_empty()
        && !local.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Artwork submission (add and edit)
#[derive(Debug, Clone, Default)]
pub struct ArtForm {
    pub art_name: String,
    pub art_category: String,
    pub description: String,
    pub art_image: Option<UploadedFile>,
}

impl ArtForm {
    /// Read the artwork fields. Any owner field the client sends is ignored.
    pub fn from_multipart_form(form: &mut MultipartForm) -> Self {
        Self {
            art_name: form.text("art_name"),
            art_category: form.text("art_category"),
            description: form.text("description"),
            art_image: form.take_file("art_image"),
        }
    }

    /// Pre-populated values for the edit form
    pub fn from_model(art: &art::Model) -> Self {
        Self {
            art_name: art.art_name.clone(),
            art_category: art.art_category.clone(),
            description: art.description.clone(),
            art_image: None,
        }
    }

    /// An image is required on create; on edit a missing image keeps the current one.
    pub fn validate(&self, mode: FormMode) -> FormErrors {
        let mut errors = FormErrors::default();

        check_text(&mut errors, "art_name", &self.art_name, Some(100));
        check_text(&mut errors, "art_category", &self.art_category, Some(50));
        check_text(&mut errors, "description", &self.description, None);
        check_image(
            &mut errors,
            "art_image",
            self.art_image.as_ref(),
            mode == FormMode::Create,
        );

        errors
    }
}

/// Artist registration and profile edit
#[derive(Debug, Clone, Default)]
pub struct ArtistForm {
    pub name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub state: String,
    pub about: String,
    pub art_category: String,
    pub profile: Option<UploadedFile>,
}

impl ArtistForm {
    pub fn from_multipart_form(form: &mut MultipartForm) -> Self {
        Self {
            name: form.text("name"),
            username: form.text("username"),
            password: form.raw("password"),
            email: form.text("email"),
            contact: form.text("contact"),
            address: form.text("address"),
            state: form.text("state"),
            about: form.text("about"),
            art_category: form.text("art_category"),
            profile: form.take_file("profile"),
        }
    }

    /// Pre-populated values for the profile edit form. The password is never echoed.
    pub fn from_model(artist: &artist::Model) -> Self {
        Self {
            name: artist.name.clone(),
            username: artist.username.clone(),
            password: String::new(),
            email: artist.email.clone(),
            contact: artist.contact.clone(),
            address: artist.address.clone(),
            state: artist.state.clone(),
            about: artist.about.clone(),
            art_category: artist.art_category.clone(),
            profile: None,
        }
    }

    /// Username and password are checked only on registration; an edit keeps the
    /// username and treats a blank password as "unchanged". Username uniqueness
    /// needs the database and is checked by the caller.
    pub fn validate(&self, mode: FormMode) -> FormErrors {
        let mut errors = FormErrors::default();

        check_text(&mut errors, "name", &self.name, Some(100));

        if mode == FormMode::Create {
            check_text(&mut errors, "username", &self.username, Some(50));
            if !errors.contains("username") && !is_valid_username(&self.username) {
                errors.add(
                    "username",
                    "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
            if self.password.is_empty() {
                errors.add("password", REQUIRED);
            }
        }

        check_text(&mut errors, "email", &self.email, Some(254));
        if !errors.contains("email") && !is_valid_email(&self.email) {
            errors.add("email", "Enter a valid email address.");
        }

        check_text(&mut errors, "contact", &self.contact, Some(15));
        check_text(&mut errors, "address", &self.address, Some(255));
        check_text(&mut errors, "state", &self.state, Some(50));
        check_text(&mut errors, "about", &self.about, None);
        check_text(&mut errors, "art_category", &self.art_category, Some(50));
        check_image(&mut errors, "profile", self.profile.as_ref(), false);

        errors
    }

    /// New password to store, if one was entered
    pub fn new_password(&self) -> Option<&str> {
        (!self.password.is_empty()).then_some(self.password.as_str())
    }
}
