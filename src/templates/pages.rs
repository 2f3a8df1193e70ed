use maud::{html, Markup, PreEscaped};

use super::components::{
    artist_card, artwork_grid, error_banner, image_field, media_url, notice, submit_button,
    text_field, textarea_field,
};
use super::layout::base_layout;
use crate::db::entities::{art, artist};
use crate::forms::{ArtForm, ArtistForm, FormErrors};
use crate::services::artwork::Portfolio;

pub fn landing_page(viewer: Option<&str>) -> Markup {
    base_layout(
        "Welcome",
        viewer,
        html! {
            section class="text-center py-16" {
                h1 class="text-4xl font-bold text-gray-900 mb-4" {
                    "Handmade art, told by the hands that made it"
                }
                p class="text-lg text-gray-600 mb-8" {
                    "Discover independent artisans, their craft and their stories."
                }
                div class="flex justify-center space-x-4" {
                    a href="/artists" class="px-6 py-3 bg-amber-600 hover:bg-amber-700 text-white font-semibold rounded-md" {
                        "Meet Our Artisans"
                    }
                    @if viewer.is_some() {
                        a href="/gallery" class="px-6 py-3 bg-white border border-amber-600 text-amber-700 font-semibold rounded-md" {
                            "Go to my gallery"
                        }
                    } @else {
                        a href="/register" class="px-6 py-3 bg-white border border-amber-600 text-amber-700 font-semibold rounded-md" {
                            "Join as an artist"
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(viewer: Option<&str>, artists: &[artist::Model]) -> Markup {
    base_layout(
        "Meet Our Artisans",
        viewer,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Meet Our Artisans" }
            @if artists.is_empty() {
                p class="text-gray-600" { "No artisans have joined yet." }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6" {
                    @for artist in artists {
                        (artist_card(artist))
                    }
                }
            }
        },
    )
}

fn artist_fields(form: &ArtistForm, errors: &FormErrors, registering: bool) -> Markup {
    html! {
        (text_field("Full name", "name", "text", &form.name, errors))
        @if registering {
            (text_field("Username", "username", "text", &form.username, errors))
            (text_field("Password", "password", "password", "", errors))
        } @else {
            (text_field("New password (leave blank to keep the current one)", "password", "password", "", errors))
        }
        (text_field("Email", "email", "email", &form.email, errors))
        (text_field("Contact number", "contact", "tel", &form.contact, errors))
        (text_field("Address", "address", "text", &form.address, errors))
        (text_field("State", "state", "text", &form.state, errors))
        (textarea_field("About you", "about", &form.about, errors))
        (text_field("Art category", "art_category", "text", &form.art_category, errors))
    }
}

pub fn register_page(viewer: Option<&str>, form: &ArtistForm, errors: &FormErrors) -> Markup {
    base_layout(
        "Register",
        viewer,
        html! {
            div class="max-w-xl mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Register as an artist" }
                @if !errors.is_empty() {
                    (error_banner("Please correct the errors below."))
                }
                form method="post" action="/register" enctype="multipart/form-data" {
                    (artist_fields(form, errors, true))
                    (image_field("Profile picture", "profile", None, errors))
                    (submit_button("Register"))
                }
                p class="text-sm text-gray-600 mt-4" {
                    "Already registered? " a href="/login" class="text-amber-700 hover:underline" { "Log in" }
                }
            }
        },
    )
}

/// Messages and carried state for the login page
#[derive(Debug, Default)]
pub struct LoginView<'a> {
    pub next: Option<&'a str>,
    pub error: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub username: &'a str,
}

pub fn login_page(viewer: Option<&str>, view: &LoginView<'_>) -> Markup {
    let no_errors = FormErrors::default();
    let action = match view.next {
        Some(next) => format!("/login?next={}", urlencoding::encode(next)),
        None => "/login".to_string(),
    };

    base_layout(
        "Log in",
        viewer,
        html! {
            div class="max-w-md mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Artist login" }
                @if let Some(message) = view.notice {
                    (notice(message))
                }
                @if let Some(message) = view.error {
                    (error_banner(message))
                }
                form method="post" action=(action) {
                    (text_field("Username", "username", "text", view.username, &no_errors))
                    (text_field("Password", "password", "password", "", &no_errors))
                    (submit_button("Log in"))
                }
                p class="text-sm text-gray-600 mt-4" {
                    "New here? " a href="/register" class="text-amber-700 hover:underline" { "Register" }
                }
            }
        },
    )
}

fn portfolio_header(artist: &artist::Model) -> Markup {
    html! {
        div class="flex items-center space-x-6 mb-8" {
            img src=(media_url(artist.profile.as_deref()))
                alt=(artist.name)
                class="w-24 h-24 rounded-full object-cover";
            div {
                h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                p class="text-gray-600" { (artist.art_category) " · " (artist.state) }
                p class="text-gray-700 mt-2" { (artist.about) }
            }
        }
        @if let Some(story) = &artist.story {
            blockquote class="italic text-gray-700 border-l-4 border-amber-500 pl-4 mb-8" { (story) }
        }
    }
}

/// The logged-in artist's own gallery, with edit and delete controls
pub fn gallery_page(portfolio: &Portfolio) -> Markup {
    let artist = &portfolio.artist;

    base_layout(
        "My Gallery",
        Some(artist.username.as_str()),
        html! {
            (portfolio_header(artist))
            div class="flex justify-between items-center mb-6" {
                h2 class="text-2xl font-semibold text-gray-900" { "My artworks" }
                a href="/art/new" class="px-4 py-2 bg-amber-600 hover:bg-amber-700 text-white font-semibold rounded-md" {
                    "Add artwork"
                }
            }
            @if portfolio.no_artworks {
                (artwork_grid(&[], false, "You have not added any artworks yet."))
            } @else {
                (artwork_grid(&portfolio.artworks, true, ""))
            }
        },
    )
}

/// Another artist's public page
pub fn artist_page(viewer: Option<&str>, portfolio: &Portfolio) -> Markup {
    let artist = &portfolio.artist;

    base_layout(
        &artist.name,
        viewer,
        html! {
            (portfolio_header(artist))
            h2 class="text-2xl font-semibold text-gray-900 mb-6" { "Artworks" }
            (artwork_grid(&portfolio.artworks, false, "This artist has not shared any artworks yet."))
        },
    )
}

pub fn profile_page(artist: &artist::Model, message: Option<&str>) -> Markup {
    base_layout(
        "My Profile",
        Some(artist.username.as_str()),
        html! {
            div class="max-w-2xl mx-auto bg-white rounded-lg shadow-md p-8" {
                @if let Some(message) = message {
                    (notice(message))
                }
                (portfolio_header(artist))
                dl class="grid grid-cols-3 gap-4 text-sm" {
                    dt class="font-medium text-gray-500" { "Username" }
                    dd class="col-span-2 text-gray-900" { (artist.username) }
                    dt class="font-medium text-gray-500" { "Email" }
                    dd class="col-span-2 text-gray-900" { (artist.email) }
                    dt class="font-medium text-gray-500" { "Contact" }
                    dd class="col-span-2 text-gray-900" { (artist.contact) }
                    dt class="font-medium text-gray-500" { "Address" }
                    dd class="col-span-2 text-gray-900" { (artist.address) }
                }
                div class="mt-6" {
                    a href="/profile/edit" class="px-4 py-2 bg-amber-600 hover:bg-amber-700 text-white font-semibold rounded-md" {
                        "Edit profile"
                    }
                }
            }
        },
    )
}

pub fn edit_profile_page(artist: &artist::Model, form: &ArtistForm, errors: &FormErrors) -> Markup {
    base_layout(
        "Edit Profile",
        Some(artist.username.as_str()),
        html! {
            div class="max-w-xl mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Edit profile" }
                @if !errors.is_empty() {
                    (error_banner("Please correct the errors below."))
                }
                form method="post" action="/profile/edit" enctype="multipart/form-data" {
                    (artist_fields(form, errors, false))
                    (image_field("Profile picture", "profile", artist.profile.as_deref(), errors))
                    (submit_button("Save changes"))
                }
            }
        },
    )
}

fn art_fields(form: &ArtForm, errors: &FormErrors) -> Markup {
    html! {
        (text_field("Art name", "art_name", "text", &form.art_name, errors))
        (text_field("Category", "art_category", "text", &form.art_category, errors))
        (textarea_field("Description", "description", &form.description, errors))
    }
}

pub fn add_art_page(viewer: &str, form: &ArtForm, errors: &FormErrors) -> Markup {
    base_layout(
        "Add Artwork",
        Some(viewer),
        html! {
            div class="max-w-xl mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Add artwork" }
                form method="post" action="/art/new" enctype="multipart/form-data" {
                    (art_fields(form, errors))
                    (image_field("Image", "art_image", None, errors))
                    (submit_button("Publish"))
                }
            }
        },
    )
}

pub fn edit_art_page(viewer: &str, art: &art::Model, form: &ArtForm, errors: &FormErrors) -> Markup {
    base_layout(
        "Edit Artwork",
        Some(viewer),
        html! {
            div class="max-w-xl mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Edit " (art.art_name) }
                form method="post" action={ "/art/" (art.id) "/edit" } enctype="multipart/form-data" {
                    (art_fields(form, errors))
                    (image_field("Image", "art_image", Some(&art.art_image), errors))
                    (submit_button("Save changes"))
                }
            }
        },
    )
}

const STORY_SCRIPT: &str = r#"
async function previewStory() {
    const text = document.getElementById('story-topic').value;
    const response = await fetch('/story/preview', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ text }),
    });
    const body = await response.json();
    document.getElementById('story-text').value = body.story_text || body.error || '';
}

async function saveStory() {
    const form = new URLSearchParams();
    form.append('story_text', document.getElementById('story-text').value);
    const response = await fetch('/story/save', { method: 'POST', body: form });
    const body = await response.json();
    document.getElementById('story-status').textContent = body.message || body.error || '';
}
"#;

pub fn story_page(artist: &artist::Model) -> Markup {
    base_layout(
        "My Story",
        Some(artist.username.as_str()),
        html! {
            div class="max-w-2xl mx-auto bg-white rounded-lg shadow-md p-8" {
                h1 class="text-2xl font-bold text-gray-900 mb-6" { "Tell your story" }
                div class="mb-4" {
                    label for="story-topic" class="block text-sm font-medium text-gray-700 mb-2" {
                        "What is your craft?"
                    }
                    input type="text" id="story-topic" value=(artist.art_category)
                        class="w-full px-3 py-2 border border-gray-300 rounded-md";
                }
                button type="button" onclick="previewStory()"
                    class="px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-md mb-4" {
                    "Generate preview"
                }
                textarea id="story-text" rows="6"
                    class="w-full px-3 py-2 border border-gray-300 rounded-md mb-4" {
                    (artist.story.as_deref().unwrap_or_default())
                }
                button type="button" onclick="saveStory()"
                    class="px-4 py-2 bg-amber-600 hover:bg-amber-700 text-white font-semibold rounded-md" {
                    "Save story"
                }
                p id="story-status" class="text-sm text-gray-600 mt-2" {}
            }
            script { (PreEscaped(STORY_SCRIPT)) }
        },
    )
}
