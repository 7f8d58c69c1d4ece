use maud::{DOCTYPE, Markup, html};

use crate::{
    cache::FetchResult,
    error::FetchError,
    models::{Character, CharacterPage},
    score::{Scorecard, Verdict, score},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page() -> String {
    page_shell(
        "Mirror Mirror",
        html! {
            div class="min-h-screen bg-gray-900 text-white" {
                div class="mx-auto flex max-w-3xl flex-col items-center px-6 py-32 text-center" {
                    h1 class="text-6xl font-bold text-blue-400" { "Mirror Mirror" }
                    h2 class="mt-6 text-3xl font-bold" { "Explore all your favorite Disney characters in one place." }

                    form class="mt-10 flex w-full max-w-md" method="get" action="/characters" {
                        input class="flex-grow rounded-l-md border border-gray-600 bg-gray-800 px-5 py-3 focus:outline-none focus:ring-2 focus:ring-blue-500" type="search" name="name" placeholder="Search for a character...";
                        button class="rounded-r-md bg-blue-600 px-6 py-3 font-semibold hover:bg-blue-700" type="submit" { "Search" }
                    }

                    div class="mt-10 flex flex-col gap-4 sm:flex-row" {
                        a class="rounded-md bg-blue-600 px-8 py-4 text-xl font-semibold hover:bg-blue-700" href="/characters" { "Browse Characters" }
                        a class="rounded-md border border-gray-500 px-8 py-4 text-xl font-semibold hover:bg-gray-800" href="/compare?first=Mickey%20Mouse&second=Donald%20Duck" { "Try a Comparison" }
                    }

                    p class="mt-12 text-sm text-gray-400" { "Enter a character name to search or browse the collection." }
                }
            }
        },
    )
}

pub fn characters_page(page: u32, filter: &str, result: &FetchResult) -> String {
    let body = match result {
        Err(err) => error_panel(err),
        Ok(listing) if listing.characters.is_empty() => empty_panel(filter),
        Ok(listing) => character_grid(&listing.characters),
    };

    page_shell(
        "Disney Characters",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="mx-auto max-w-6xl px-6 py-10" {
                    (list_header(page, filter, result))
                    (body)
                }
            }
        },
    )
}

pub fn character_page(name: &str, result: &FetchResult) -> String {
    let body = match result {
        Err(err) => error_panel(err),
        Ok(listing) => match listing.characters.first() {
            Some(character) => character_detail(character),
            None => html! {
                div class="mt-8 rounded-lg bg-white p-8 shadow" {
                    p class="text-gray-600" { "No character data found for " span class="font-semibold" { (name) } "." }
                }
            },
        },
    };

    page_shell(
        name,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="mx-auto max-w-4xl px-6 py-10" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/characters" { "Back to all characters" }
                    (body)
                }
            }
        },
    )
}

pub fn compare_picker_page(first: &str, second: &str) -> String {
    page_shell(
        "Compare",
        html! {
            div class="flex min-h-screen items-center justify-center bg-gray-50" {
                div class="w-full max-w-xl px-6" {
                    div class="rounded-lg bg-white p-8 shadow" {
                        h1 class="text-2xl font-bold text-gray-900" { "Compare two characters" }
                        p class="mt-2 text-gray-600" { "Pick two characters to see who comes out ahead." }

                        form class="mt-6 space-y-4" method="get" action="/compare" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="first" { "First character" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none" name="first" id="first" value=(first) required;
                            }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="second" { "Second character" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none" name="second" id="second" value=(second) required;
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Compare" }
                        }
                    }
                }
            }
        },
    )
}

pub fn compare_page(
    first_name: &str,
    second_name: &str,
    first: &CharacterPage,
    second: &CharacterPage,
) -> String {
    let body = match (first.characters.first(), second.characters.first()) {
        (Some(a), Some(b)) => comparison(a, b),
        (None, _) => missing_panel(first_name),
        (_, None) => missing_panel(second_name),
    };

    page_shell(
        "Compare",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="mx-auto max-w-3xl px-6 py-10" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/characters" { "Back to all characters" }
                    (body)
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page_shell(
        "Error",
        html! {
            div class="flex min-h-screen items-center justify-center bg-gray-50" {
                div class="w-full max-w-xl px-6" {
                    div class="rounded-lg bg-white p-8 shadow" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page_shell(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn list_header(page: u32, filter: &str, result: &FetchResult) -> Markup {
    let has_more = matches!(result, Ok(listing) if listing.has_more);

    html! {
        div class="flex flex-col gap-4 sm:flex-row sm:items-center sm:justify-between" {
            div {
                h1 class="text-3xl font-bold text-gray-900" { "Disney Characters" }
                p class="mt-1 text-gray-600" { "Page " (page) }
            }

            form class="flex" method="get" action="/characters" {
                input class="w-64 rounded-l-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none" type="search" name="name" value=(filter) placeholder="Search characters...";
                button class="rounded-r-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
            }

            div class="flex items-center gap-2" {
                @if page > 1 {
                    a class="rounded-md border border-gray-300 bg-white px-3 py-2 text-sm hover:bg-gray-100" href=(page_href(page - 1, filter)) { "Previous" }
                }
                @if has_more {
                    a class="rounded-md border border-gray-300 bg-white px-3 py-2 text-sm hover:bg-gray-100" href=(page_href(page + 1, filter)) { "Next" }
                }
            }
        }
    }
}

fn page_href(page: u32, filter: &str) -> String {
    format!("/characters?page={}&name={}", page, urlencoding::encode(filter))
}

fn character_grid(characters: &[Character]) -> Markup {
    html! {
        div class="mt-8 grid grid-cols-2 gap-6 md:grid-cols-4 xl:grid-cols-6" {
            @for character in characters {
                (character_card(character))
            }
        }
    }
}

fn character_card(character: &Character) -> Markup {
    let encoded = urlencoding::encode(&character.name).into_owned();

    html! {
        div class="flex flex-col overflow-hidden rounded-lg bg-white shadow" {
            @if let Some(url) = &character.image_url {
                img class="h-40 w-full bg-gray-100 object-contain" src=(url) alt=(character.name);
            } @else {
                div class="flex h-40 w-full items-center justify-center bg-gray-100 text-sm text-gray-500" { "No image" }
            }
            div class="flex flex-1 flex-col gap-2 p-4" {
                h3 class="text-center font-medium text-gray-900" { (character.name) }
                div class="mt-auto flex justify-center gap-3 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/character/{encoded}")) { "View" }
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/compare?first={encoded}")) { "Compare" }
                }
            }
        }
    }
}

fn character_detail(character: &Character) -> Markup {
    let sections = category_sections(character);

    html! {
        div class="mt-6 overflow-hidden rounded-xl bg-white shadow" {
            div class="flex flex-col gap-6 bg-blue-50 p-8 md:flex-row md:items-start" {
                @if let Some(url) = &character.image_url {
                    img class="h-48 w-48 rounded-lg bg-white object-cover" src=(url) alt=(character.name);
                }
                div {
                    h1 class="text-4xl font-bold text-blue-900" { (character.name) }
                    div class="mt-4 flex flex-wrap gap-2" {
                        @for (label, items) in &sections {
                            @if !items.is_empty() {
                                span class="rounded-full bg-blue-100 px-3 py-1 text-xs font-medium text-blue-800" {
                                    (items.len()) " " (label)
                                }
                            }
                        }
                    }
                }
            }

            div class="grid gap-6 p-8 md:grid-cols-2" {
                @for (label, items) in &sections {
                    @if !items.is_empty() {
                        div class="rounded-lg bg-gray-50 p-5" {
                            h3 class="text-lg font-semibold text-gray-900" { (label) }
                            ul class="mt-3 space-y-1" {
                                @for item in *items {
                                    li class="border-l-2 border-blue-200 pl-3 text-sm text-gray-700" { (item) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn comparison(first: &Character, second: &Character) -> Markup {
    let card = score(first, second);

    html! {
        div class="mt-6 rounded-lg bg-white p-8 shadow" {
            div class="grid grid-cols-3 items-center gap-4" {
                (contender(first))
                div class="mx-auto flex h-16 w-16 items-center justify-center rounded-full bg-amber-100" {
                    span class="text-2xl font-bold text-amber-700" { "VS" }
                }
                (contender(second))
            }

            (verdict_banner(&card, first, second))

            div class="mt-8 space-y-2 rounded-lg bg-gray-50 py-2" {
                @for attribute in &card.attributes {
                    (score_row(attribute.label.as_str(), attribute.value1, attribute.value2))
                }
            }

            h3 class="mt-8 text-sm font-semibold uppercase tracking-wide text-gray-500" { "Appearance counts" }
            div class="mt-2 space-y-2 rounded-lg bg-gray-50 py-2" {
                @for (label, left, right) in raw_counts(first, second) {
                    (score_row(label, left, right))
                }
            }
        }
    }
}

fn contender(character: &Character) -> Markup {
    html! {
        div {
            @if let Some(url) = &character.image_url {
                img class="mx-auto mb-3 h-32 w-32 rounded-full bg-gray-100 object-cover" src=(url) alt=(character.name);
            }
            h2 class="text-center text-xl font-bold text-blue-900" { (character.name) }
        }
    }
}

fn verdict_banner(card: &Scorecard, first: &Character, second: &Character) -> Markup {
    let text = match card.verdict {
        Verdict::FirstWins => format!("{} wins!", first.name),
        Verdict::SecondWins => format!("{} wins!", second.name),
        Verdict::Tie => "It's a tie!".to_string(),
    };

    html! {
        div class="mt-8 rounded-lg bg-amber-50 p-4 text-center" {
            span class="text-2xl font-bold text-amber-700" { (text) }
        }
    }
}

fn score_row(label: &str, left: impl maud::Render, right: impl maud::Render) -> Markup {
    html! {
        div class="grid grid-cols-3 items-center gap-4 rounded-md bg-white p-3" {
            div class="text-center text-xl font-medium" { (left) }
            div class="text-center text-lg font-semibold text-gray-700" { (label) }
            div class="text-center text-xl font-medium" { (right) }
        }
    }
}

fn raw_counts(first: &Character, second: &Character) -> [(&'static str, usize, usize); 7] {
    [
        ("Films", first.films.len(), second.films.len()),
        ("Short Films", first.short_films.len(), second.short_films.len()),
        ("TV Shows", first.tv_shows.len(), second.tv_shows.len()),
        ("Video Games", first.video_games.len(), second.video_games.len()),
        ("Park Attractions", first.park_attractions.len(), second.park_attractions.len()),
        ("Allies", first.allies.len(), second.allies.len()),
        ("Enemies", first.enemies.len(), second.enemies.len()),
    ]
}

fn missing_panel(name: &str) -> Markup {
    html! {
        div class="mt-8 rounded-lg bg-white p-8 shadow" {
            p class="text-gray-600" { "No character found named " span class="font-semibold" { (name) } "." }
        }
    }
}

fn error_panel(error: &FetchError) -> Markup {
    html! {
        div class="mt-8 rounded-lg bg-red-50 p-6 text-center" {
            p class="font-semibold text-red-700" { "Error loading characters" }
            p class="mt-2 text-sm text-red-600" { (error) }
        }
    }
}

fn empty_panel(filter: &str) -> Markup {
    html! {
        div class="mt-12 flex flex-col items-center rounded-lg bg-white p-12 text-center shadow" {
            h3 class="text-xl font-medium text-gray-900" { "No characters found" }
            @if filter.is_empty() {
                p class="mt-2 text-gray-600" { "Nothing came back for this page." }
            } @else {
                p class="mt-2 text-gray-600" { "Nothing matches " span class="font-semibold" { (filter) } ". Try a different search." }
            }
        }
    }
}

fn category_sections(character: &Character) -> [(&'static str, &[String]); 7] {
    [
        ("Films", character.films.as_slice()),
        ("Short Films", character.short_films.as_slice()),
        ("TV Shows", character.tv_shows.as_slice()),
        ("Video Games", character.video_games.as_slice()),
        ("Park Attractions", character.park_attractions.as_slice()),
        ("Allies", character.allies.as_slice()),
        ("Enemies", character.enemies.as_slice()),
    ]
}
