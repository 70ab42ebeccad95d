/// Walks through the main `SearchEngine` surface: add documents, rank a
/// plus/minus query, match a single document against a query, remove a
/// document, and drop duplicates.
use tfidx::core::types::DocumentStatus;
use tfidx::SearchEngine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stop_words = ["и", "в", "на"];
    let mut engine = SearchEngine::new(stop_words)?;

    engine.add_document(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3])?;
    engine.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7])?;
    engine.add_document(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    engine.add_document(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9])?;
    println!("indexed {} documents", engine.document_count());

    println!("\nsearching 'пушистый ухоженный кот -пёс'");
    for doc in engine.find_top_documents("пушистый ухоженный кот -пёс")? {
        println!("  {doc}");
    }

    println!("\nmatching document 1 against 'пушистый кот'");
    let (matched, status) = engine.match_document(
        tfidx::ExecutionPolicy::Sequential,
        "пушистый кот",
        1,
    )?;
    println!("  matched words: {matched:?}, status: {status:?}");

    engine.remove_document(tfidx::ExecutionPolicy::Sequential, 3);
    println!("\nremoved document 3, {} documents remain", engine.document_count());

    engine.add_document(4, "белый кот и модный ошейник", DocumentStatus::Actual, &[1])?;
    let mut removed = Vec::new();
    engine.remove_duplicates(|id| removed.push(id));
    println!("\nremove_duplicates dropped: {removed:?}");

    Ok(())
}
