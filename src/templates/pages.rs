use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    checkbox, format_datetime, genre_tags, genres_select, search_box, show_card, state_select,
    text_input, DateStyle, Flash,
};
use super::layout::base_layout;
use crate::{
    forms::{ArtistForm, VenueForm},
    services::{ArtistDetail, ArtistSummary, SearchResults, ShowListing, VenueArea, VenueDetail},
};

pub fn home_page(flash: Option<&Flash>) -> Markup {
    base_layout(
        "Home",
        flash,
        html! {
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { "Fyyur" }
                p class="text-gray-600 mt-2" { "Find venues, discover artists, book shows." }

                div class="mt-8 flex justify-center gap-4" {
                    a href="/venues/create" class="btn" { "Post a venue" }
                    a href="/artists/create" class="btn" { "Post an artist" }
                    a href="/shows/create" class="btn" { "Post a show" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[VenueArea]) -> Markup {
    base_layout(
        "Venues",
        None,
        html! {
            (search_box("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                p class="text-gray-600" { "No venues listed yet." }
            }
            @for area in areas {
                section class="area mb-8" {
                    h3 class="text-lg font-semibold text-gray-900" {
                        (area.city) ", " (area.state)
                    }
                    ul class="mt-2 space-y-1" {
                        @for venue in &area.venues {
                            li {
                                a href={ "/venues/" (venue.id) } { (venue.name) }
                                @if venue.num_upcoming_shows > 0 {
                                    span class="ml-2 text-sm text-gray-500" {
                                        (venue.num_upcoming_shows) " upcoming"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[ArtistSummary]) -> Markup {
    base_layout(
        "Artists",
        None,
        html! {
            (search_box("/artists/search", "Find an artist", ""))

            ul class="space-y-1" {
                @for artist in artists {
                    li { a href={ "/artists/" (artist.id) } { (artist.name) } }
                }
            }
        },
    )
}

/// Results page shared by venue and artist search; `kind` is the URL prefix.
pub fn search_results_page(kind: &str, term: &str, results: &SearchResults) -> Markup {
    base_layout(
        "Search",
        None,
        html! {
            (search_box(&format!("/{}/search", kind), "Search again", term))

            h3 class="text-lg font-semibold mb-4" {
                "Number of search results for \"" (term) "\": " (results.count)
            }
            ul class="space-y-1" {
                @for hit in &results.data {
                    li {
                        a href={ "/" (kind) "/" (hit.id) } { (hit.name) }
                        span class="ml-2 text-sm text-gray-500" {
                            (hit.num_upcoming_shows) " upcoming"
                        }
                    }
                }
            }
        },
    )
}

fn contact_block(
    city: &str,
    state: &str,
    address: Option<&str>,
    phone: Option<&str>,
    website: Option<&str>,
    facebook_link: Option<&str>,
) -> Markup {
    html! {
        dl class="contact text-sm text-gray-700 space-y-1" {
            dt class="sr-only" { "Location" }
            dd { @if let Some(address) = address { (address) ", " } (city) ", " (state) }
            @if let Some(phone) = phone {
                dt class="sr-only" { "Phone" }
                dd { (phone) }
            }
            @if let Some(website) = website {
                dt class="sr-only" { "Website" }
                dd { a href=(website) target="_blank" { (website) } }
            }
            @if let Some(facebook) = facebook_link {
                dt class="sr-only" { "Facebook" }
                dd { a href=(facebook) target="_blank" { (facebook) } }
            }
        }
    }
}

pub fn venue_detail_page(detail: &VenueDetail) -> Markup {
    let venue = &detail.venue;

    base_layout(
        &venue.name,
        None,
        html! {
            div class="flex justify-between items-start" {
                div {
                    p class="text-sm text-gray-500" { "ID: " (venue.id) }
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    (genre_tags(&detail.genres))
                }
                div class="flex gap-2" {
                    a href={ "/venues/" (venue.id) "/edit" } class="btn" { "Edit" }
                    button
                        class="btn btn-danger"
                        hx-delete={ "/venues/" (venue.id) }
                        hx-confirm="Delete this venue?"
                        hx-target="body" { "Delete" }
                }
            }

            (contact_block(
                &venue.city,
                &venue.state,
                Some(venue.address.as_str()),
                venue.phone.as_deref(),
                venue.website.as_deref(),
                venue.facebook_link.as_deref(),
            ))

            @if venue.seeking_talent {
                div class="seeking mt-4 p-4 bg-yellow-50 rounded-md" {
                    p class="font-semibold" { "Currently seeking talent" }
                    @if let Some(description) = &venue.seeking_description {
                        p { (description) }
                    }
                }
            } @else {
                p class="mt-4 text-gray-500" { "Not currently seeking talent" }
            }

            @if let Some(image) = &venue.image_link {
                img src=(image) alt="Venue Image" class="mt-6 rounded-lg max-w-md";
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold" { (detail.upcoming_shows_count()) " Upcoming Shows" }
                div class="grid gap-4 mt-2" {
                    @for show in &detail.upcoming_shows {
                        (show_card(
                            &format!("/artists/{}", show.artist_id),
                            &show.artist_name,
                            show.artist_image_link.as_deref(),
                            &format_datetime(&show.starts_at, DateStyle::Full),
                        ))
                    }
                }
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold" { (detail.past_shows_count()) " Past Shows" }
                div class="grid gap-4 mt-2" {
                    @for show in &detail.past_shows {
                        (show_card(
                            &format!("/artists/{}", show.artist_id),
                            &show.artist_name,
                            show.artist_image_link.as_deref(),
                            &format_datetime(&show.starts_at, DateStyle::Full),
                        ))
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail) -> Markup {
    let artist = &detail.artist;

    base_layout(
        &artist.name,
        None,
        html! {
            div class="flex justify-between items-start" {
                div {
                    p class="text-sm text-gray-500" { "ID: " (artist.id) }
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    (genre_tags(&detail.genres))
                }
                div class="flex gap-2" {
                    a href={ "/artists/" (artist.id) "/edit" } class="btn" { "Edit" }
                    button
                        class="btn btn-danger"
                        hx-delete={ "/artists/" (artist.id) }
                        hx-confirm="Delete this artist?"
                        hx-target="body" { "Delete" }
                }
            }

            (contact_block(
                &artist.city,
                &artist.state,
                None,
                artist.phone.as_deref(),
                artist.website.as_deref(),
                artist.facebook_link.as_deref(),
            ))

            @if artist.seeking_venue {
                div class="seeking mt-4 p-4 bg-yellow-50 rounded-md" {
                    p class="font-semibold" { "Currently seeking performance venues" }
                    @if let Some(description) = &artist.seeking_description {
                        p { (description) }
                    }
                }
            } @else {
                p class="mt-4 text-gray-500" { "Not currently seeking performance venues" }
            }

            @if let Some(image) = &artist.image_link {
                img src=(image) alt="Artist Image" class="mt-6 rounded-lg max-w-md";
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold" { (detail.upcoming_shows_count()) " Upcoming Shows" }
                div class="grid gap-4 mt-2" {
                    @for show in &detail.upcoming_shows {
                        (show_card(
                            &format!("/venues/{}", show.venue_id),
                            &show.venue_name,
                            show.venue_image_link.as_deref(),
                            &format_datetime(&show.starts_at, DateStyle::Full),
                        ))
                    }
                }
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold" { (detail.past_shows_count()) " Past Shows" }
                div class="grid gap-4 mt-2" {
                    @for show in &detail.past_shows {
                        (show_card(
                            &format!("/venues/{}", show.venue_id),
                            &show.venue_name,
                            show.venue_image_link.as_deref(),
                            &format_datetime(&show.starts_at, DateStyle::Full),
                        ))
                    }
                }
            }
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        None,
        html! {
            div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                @for show in shows {
                    div class="show-card bg-white rounded-lg shadow-sm p-4 flex gap-4" {
                        @if let Some(src) = &show.artist_image_link {
                            img src=(src) alt=(show.artist_name) class="w-16 h-16 object-cover rounded" loading="lazy";
                        }
                        div {
                            p class="text-sm text-gray-500" {
                                (format_datetime(&show.starts_at, DateStyle::Medium))
                            }
                            a href={ "/artists/" (show.artist_id) } class="font-semibold" { (show.artist_name) }
                            p class="text-sm" {
                                "playing at "
                                a href={ "/venues/" (show.venue_id) } { (show.venue_name) }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn shared_profile_fields(
    name: &str,
    city: &str,
    state: &str,
    phone: Option<&str>,
    image_link: Option<&str>,
    facebook_link: Option<&str>,
    website_link: Option<&str>,
    genres: &[String],
) -> Markup {
    html! {
        (text_input("Name", "name", Some(name), true))
        (text_input("City", "city", Some(city), true))
        (state_select(state))
        (text_input("Phone", "phone", phone, false))
        (text_input("Image Link", "image_link", image_link, false))
        (genres_select(genres))
        (text_input("Facebook Link", "facebook_link", facebook_link, false))
        (text_input("Website Link", "website_link", website_link, false))
    }
}

/// Create and edit form for venues; `action` is the submit URL.
pub fn venue_form_page(heading: &str, action: &str, form: &VenueForm, flash: Option<&Flash>) -> Markup {
    base_layout(
        heading,
        flash,
        html! {
            form method="post" action=(action) class="max-w-xl bg-white rounded-lg shadow-sm p-6" {
                h3 class="text-xl font-semibold mb-4" { (heading) }
                (shared_profile_fields(
                    &form.name,
                    &form.city,
                    &form.state,
                    form.phone.as_deref(),
                    form.image_link.as_deref(),
                    form.facebook_link.as_deref(),
                    form.website_link.as_deref(),
                    &form.genres,
                ))
                (text_input("Address", "address", Some(form.address.as_str()), true))
                (checkbox("Looking for Talent", "seeking_talent", form.seeking_talent))
                (text_input("Seeking Description", "seeking_description", form.seeking_description.as_deref(), false))
                button type="submit" class="btn" { "Save Venue" }
            }
        },
    )
}

pub fn artist_form_page(heading: &str, action: &str, form: &ArtistForm, flash: Option<&Flash>) -> Markup {
    base_layout(
        heading,
        flash,
        html! {
            form method="post" action=(action) class="max-w-xl bg-white rounded-lg shadow-sm p-6" {
                h3 class="text-xl font-semibold mb-4" { (heading) }
                (shared_profile_fields(
                    &form.name,
                    &form.city,
                    &form.state,
                    form.phone.as_deref(),
                    form.image_link.as_deref(),
                    form.facebook_link.as_deref(),
                    form.website_link.as_deref(),
                    &form.genres,
                ))
                (checkbox("Looking for Venues", "seeking_venue", form.seeking_venue))
                (text_input("Seeking Description", "seeking_description", form.seeking_description.as_deref(), false))
                button type="submit" class="btn" { "Save Artist" }
            }
        },
    )
}

pub fn show_form_page(flash: Option<&Flash>) -> Markup {
    base_layout(
        "New Show",
        flash,
        html! {
            form method="post" action="/shows/create" class="max-w-xl bg-white rounded-lg shadow-sm p-6" {
                h3 class="text-xl font-semibold mb-4" { "List a new show" }
                (text_input("Artist ID", "artist_id", None, true))
                (text_input("Venue ID", "venue_id", None, true))
                div class="form-group mb-4" {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-1" { "Start Time" }
                    input type="datetime-local" id="start_time" name="start_time" required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md";
                }
                button type="submit" class="btn" { "Create Show" }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::UNPROCESSABLE_ENTITY => "Invalid Submission",
        StatusCode::CONFLICT => "Conflict",
        _ => "Something went wrong",
    };

    base_layout(
        heading,
        None,
        html! {
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { (status.as_u16()) " " (heading) }
                p class="text-gray-600 mt-4" { (message) }
                a href="/" class="btn mt-6 inline-block" { "Back home" }
            }
        },
    )
}
