//! Prompt builders.
//!
//! Kept separate from the call sites so wording can change without touching
//! transport or fallback logic.

use paperlens_core::models::paper::PaperMetadata;
use paperlens_core::models::payload::ExportPayload;

/// Render one paper as a prompt block.
fn paper_block(index: usize, paper: &PaperMetadata) -> String {
    format!(
        "Paper {n}: {title} by {authors}\nAbstract: {abstract_}\nLink: {link}\nPublished: {published}\nCategories: {categories}",
        n = index + 1,
        title = paper.title,
        authors = paper.authors_line(),
        abstract_ = paper.summary,
        link = paper.link,
        published = paper.published,
        categories = paper.categories_line(),
    )
}

/// Summarization prompt: every paper's metadata plus numbered-section
/// output instructions.
pub fn summary_prompt(papers: &[PaperMetadata], query: &str) -> String {
    let listing = papers
        .iter()
        .enumerate()
        .map(|(i, p)| paper_block(i, p))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a research assistant. The user is researching: \"{query}\".

For each paper listed below:

1. Summarize the main contributions in plain, clear language.
2. Highlight the key findings, including any comparison the research question implies.
3. Note important limitations or open gaps.
4. Keep each abstract recap to two or three lines.
5. Reduce the category field to a single main category.
6. Use this numbered layout for every paper:
   - Paper #: Title, Authors
     1. Main Contributions:
     2. Key Findings:
     3. Important Limitations:
     4. Links:
7. Be thorough; the summary is the most important part.

Papers:
{listing}
"
    )
}

/// HTML formatting prompt for a conversation export.
pub fn html_prompt(payload: &ExportPayload) -> String {
    format!(
        "You are an HTML formatter. Turn the research assistant data below into a complete, visually appealing HTML document that will be printed to PDF.

- Do not wrap the output in code fences such as ```html.
- Use <section> for each main category: Query, Answer, Papers, Summary, Validation.
- Use <article> for each paper, including its title, authors, link and paper ID when known.
- Use <h1> for the page heading, <h2> for section headings and <h3> for paper titles.
- Bold important labels such as Authors, Link, Paper ID and Feedback.
- Style everything with inline CSS:
  - spacing (margin and padding) between sections and articles;
  - distinct heading colors;
  - for Validation, render \"Is Valid\" true in green and false in red;
  - a readable font family and sizes;
  - optionally a subtle background or border on sections.
- The document is printed in a single pass onto A4 pages; ignore paragraphs that would split across pages and keep the layout clean.
- Return only the HTML document, with no explanation.

Query: {query}
Answer: {answer}
Papers: {papers}
Summary: {summary}
Validation: {validation}
",
        query = payload.query,
        answer = payload.answer,
        papers = payload.papers_line(),
        summary = payload.summary_or_placeholder(),
        validation = payload.validation.to_json(),
    )
}
