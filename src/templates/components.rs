use maud::{html, Markup};

use crate::db::entities::{art, artist};
use crate::forms::FormErrors;
use crate::services::MediaStore;

const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.png";

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-amber-500";

pub fn media_url(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => MediaStore::url(path),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Single artwork tile. `editable` adds the owner's edit and delete controls.
pub fn art_card(art: &art::Model, editable: bool) -> Markup {
    html! {
        div class="art-card bg-white rounded-lg shadow-md overflow-hidden" {
            div class="relative aspect-square" {
                img
                    src=(media_url(Some(&art.art_image)))
                    alt=(art.art_name)
                    class="w-full h-full object-cover"
                    loading="lazy";
                div class="absolute top-2 right-2" {
                    span class="px-2 py-1 text-xs font-semibold text-white rounded-full bg-amber-600" {
                        (art.art_category)
                    }
                }
            }

            div class="p-4" {
                h3 class="font-semibold text-gray-900 truncate" title=(art.art_name) {
                    (art.art_name)
                }
                p class="text-sm text-gray-600 mt-1" { (art.description) }

                @if editable {
                    div class="flex items-center space-x-2 mt-4" {
                        a href={ "/art/" (art.id) "/edit" }
                            class="px-3 py-1 text-sm bg-gray-100 hover:bg-gray-200 rounded-md" {
                            "Edit"
                        }
                        form method="post" action={ "/art/" (art.id) "/delete" }
                            onsubmit="return confirm('Delete this artwork permanently?');" {
                            button type="submit"
                                class="px-3 py-1 text-sm bg-red-500 hover:bg-red-600 text-white rounded-md" {
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn artwork_grid(artworks: &[art::Model], editable: bool, empty_message: &str) -> Markup {
    html! {
        @if artworks.is_empty() {
            div class="text-center py-12" {
                p class="text-gray-600 text-lg" { (empty_message) }
            }
        } @else {
            div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6" {
                @for art in artworks {
                    (art_card(art, editable))
                }
            }
        }
    }
}

pub fn artist_card(artist: &artist::Model) -> Markup {
    html! {
        a href={ "/artists/" (artist.username) }
            class="block bg-white rounded-lg shadow-md p-6 hover:shadow-lg transition-shadow" {
            div class="flex items-center space-x-4" {
                img src=(media_url(artist.profile.as_deref()))
                    alt=(artist.name)
                    class="w-16 h-16 rounded-full object-cover";
                div {
                    h3 class="text-lg font-semibold text-gray-900" { (artist.name) }
                    p class="text-sm text-gray-600" { (artist.art_category) " · " (artist.state) }
                }
            }
        }
    }
}

pub fn notice(message: &str) -> Markup {
    html! {
        div class="mb-4 p-4 rounded-md bg-green-50 text-green-800 border border-green-200" {
            (message)
        }
    }
}

pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="mb-4 p-4 rounded-md bg-red-50 text-red-800 border border-red-200" {
            (message)
        }
    }
}

fn field_error(errors: &FormErrors, name: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(name) {
            p class="text-sm text-red-600 mt-1" { (message) }
        }
    }
}

pub fn text_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FormErrors,
) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type=(input_type) id=(name) name=(name) value=(value) class=(INPUT_CLASS);
            (field_error(errors, name))
        }
    }
}

pub fn textarea_field(label: &str, name: &str, value: &str, errors: &FormErrors) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            textarea id=(name) name=(name) rows="4" class=(INPUT_CLASS) { (value) }
            (field_error(errors, name))
        }
    }
}

/// Image upload input, showing the currently stored image when editing
pub fn image_field(label: &str, name: &str, current: Option<&str>, errors: &FormErrors) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            @if let Some(path) = current {
                img src=(media_url(Some(path))) alt="Current image" class="w-32 h-32 object-cover rounded-md mb-2";
                p class="text-xs text-gray-500 mb-2" { "Leave empty to keep the current image." }
            }
            input type="file" id=(name) name=(name) accept="image/*" class=(INPUT_CLASS);
            (field_error(errors, name))
        }
    }
}

pub fn submit_button(label: &str) -> Markup {
    html! {
        button type="submit"
            class="px-4 py-2 bg-amber-600 hover:bg-amber-700 text-white font-semibold rounded-md" {
            (label)
        }
    }
}
