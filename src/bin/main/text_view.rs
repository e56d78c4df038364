use quranku_core::render::{PageBody, PageView};

const PREVIEW_VERSES: usize = 5;

/// Plain-text rendering of a page frame on stdout.
pub(super) fn print_page(view: &PageView<'_>) {
    println!();
    println!("== {} (font {})", view.document_title, view.font_preload_href);
    println!("## {}", view.header_title);

    match &view.body {
        PageBody::Loading => println!("   ... loading ..."),
        PageBody::Unavailable => println!("   chapter unavailable"),
        PageBody::Chapter {
            preface, audio, ..
        } => {
            if let Some(preface) = preface {
                println!("   {}", preface.arabic);
                println!("   {}", preface.translation);
            }

            let items = view.body.verse_items();
            for item in items.iter().take(PREVIEW_VERSES) {
                println!(
                    "   [{}:{}] {}",
                    item.chapter_id, item.verse.verse_number, item.verse.arabic_text
                );
                println!("          {}", item.verse.translation_text);
            }
            if items.len() > PREVIEW_VERSES {
                println!("   ... {} more verses", items.len() - PREVIEW_VERSES);
            }

            println!(
                "   audio: {} ({}{})",
                audio.src.unwrap_or("-"),
                if audio.playing { "playing" } else { "paused" },
                if audio.looped { ", loop" } else { "" }
            );
        }
    }

    let footer = &view.footer;
    println!(
        "<< {} {} | {} {} >>",
        footer.previous_id.as_ref().map_or("-", |id| id.as_str()),
        footer.previous_name,
        footer.next_name,
        footer.next_id.as_ref().map_or("-", |id| id.as_str()),
    );
}
