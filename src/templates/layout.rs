use maud::{html, Markup, DOCTYPE};

/// Page shell. `viewer` is the logged-in artist's username, which switches the
/// navigation between visitor and artist links.
pub fn base_layout(title: &str, viewer: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Artisan Gallery" }

                // Compiled TailwindCSS
                link rel="stylesheet" href="/static/css/output.css";

                style {
                    r#"
                    .art-card:hover {
                        transform: translateY(-4px);
                        box-shadow: 0 10px 20px rgba(0,0,0,0.1);
                    }
                    "#
                }
            }
            body class="h-full bg-amber-50" {
                div class="min-h-full" {
                    (nav_bar(viewer))

                    main class="container mx-auto px-4 py-8" {
                        (content)
                    }

                    (footer())
                }
            }
        }
    }
}

fn nav_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) class="text-gray-700 hover:text-amber-700 px-3 py-2 rounded-md text-sm font-medium" {
            (label)
        }
    }
}

fn nav_bar(viewer: Option<&str>) -> Markup {
    html! {
        nav class="bg-white shadow-sm" {
            div class="container mx-auto px-4" {
                div class="flex justify-between items-center h-16" {
                    a href="/" class="flex items-center space-x-3" {
                        span class="text-2xl" { "🏺" }
                        span class="text-xl font-bold text-gray-900" { "Artisan Gallery" }
                    }

                    div class="flex items-center space-x-4" {
                        (nav_link("/artists", "Meet Our Artisans"))
                        @if let Some(username) = viewer {
                            (nav_link("/gallery", "My Gallery"))
                            (nav_link("/art/new", "Add Artwork"))
                            (nav_link("/story", "My Story"))
                            (nav_link("/profile", "Profile"))
                            form method="post" action="/logout" class="inline" {
                                button type="submit"
                                    class="text-gray-700 hover:text-amber-700 px-3 py-2 rounded-md text-sm font-medium"
                                    title={ "Logged in as " (username) } {
                                    "Log out"
                                }
                            }
                        } @else {
                            (nav_link("/login", "Log in"))
                            (nav_link("/register", "Register"))
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="bg-white border-t border-gray-200 mt-12" {
            div class="container mx-auto px-4 py-6" {
                div class="text-center text-gray-600 text-sm" {
                    "Artisan Gallery - Handmade work from independent artists"
                }
            }
        }
    }
}
