//! Selection protocol over a corpus loaded from disk
//!
//! Drives the load chain end to end (files → tagger → metrics → widgets)
//! and checks the cross-widget guarantees: every widget follows a commit,
//! repeated commits are idempotent and hover never sticks.

use fabula_common::config::{CorpusConfig, TomlConfig};
use fabula_common::loader::load_corpus;
use fabula_dash::widgets::{HoverTarget, InfoTopic};
use fabula_dash::Dashboard;
use std::fs;
use tempfile::TempDir;

const DIFFICULTY_CSV: &str = "Word,Length,I_Zscore\n\
    cat,3,-0.5\n\
    sat,3,0.1\n\
    fat,3,0.4\n\
    grey,4,0.2\n\
    slowly,6,0.6\n\
    purred,6,0.9\n\
    mouse,5,0.3\n";

async fn load(dir: &TempDir) -> Dashboard {
    let corpus_path = dir.path().join("tales.txt");
    let difficulty_path = dir.path().join("difficulty.csv");
    let lexicon_path = dir.path().join("lexicon.txt");

    let stories = [
        "PREFACE",
        "The fat cat sat slowly.",
        "A grey mouse purred.",
        "The fat grey cat sat.",
    ];
    fs::write(&corpus_path, stories.join(&"\n".repeat(8))).unwrap();
    fs::write(&difficulty_path, DIFFICULTY_CSV).unwrap();
    fs::write(&lexicon_path, "# animals\ncat NN\nmouse NN\nsat VBD\nfat JJ\ngrey JJ\n").unwrap();

    let config = TomlConfig {
        corpus_path,
        difficulty_path,
        lexicon_path: Some(lexicon_path),
        corpus: CorpusConfig {
            story_start: 1,
            story_end: 4,
            titles: Some(vec![
                "THE FAT CAT".to_string(),
                "THE GREY MOUSE".to_string(),
                "THE GREY CAT".to_string(),
            ]),
            ..CorpusConfig::default()
        },
        ..TomlConfig::default()
    };

    let corpus = load_corpus(&config).await.unwrap();
    Dashboard::new(corpus, &config.layout)
}

fn render_all(dash: &Dashboard, hover: Option<&HoverTarget>) -> Vec<String> {
    let names: Vec<_> = dash.widget_names().collect();
    names
        .into_iter()
        .map(|name| dash.render(name, hover).unwrap())
        .collect()
}

#[tokio::test]
async fn test_loaded_metrics_reach_widgets() {
    let dir = TempDir::new().unwrap();
    let mut dash = load(&dir).await;

    // fat, slowly over sat
    let story = dash.select("THE FAT CAT").unwrap();
    assert_eq!(story.descriptors, vec!["fat", "slowly"]);
    assert_eq!(story.verbs, vec!["sat"]);

    let diagram = dash.render("diagram", None).unwrap();
    assert!(diagram.contains(">THE FAT CAT</text>"));

    let hover = HoverTarget::DiagramWordiness;
    let diagram = dash.render("diagram", Some(&hover)).unwrap();
    assert!(diagram.contains(">2.000<"));
}

#[tokio::test]
async fn test_commit_is_idempotent() {
    let dir = TempDir::new().unwrap();

    let mut once = load(&dir).await;
    once.select("THE GREY CAT").unwrap();

    let mut repeated = load(&dir).await;
    repeated.select("THE FAT CAT").unwrap();
    repeated.select("THE GREY CAT").unwrap();
    repeated.select("THE GREY CAT").unwrap();

    assert_eq!(render_all(&once, None), render_all(&repeated, None));
}

#[tokio::test]
async fn test_hover_composes_over_commit() {
    let dir = TempDir::new().unwrap();
    let mut dash = load(&dir).await;

    let hovers = [
        HoverTarget::Story("THE GREY MOUSE".to_string()),
        HoverTarget::DiagramComplexity,
        HoverTarget::Info(InfoTopic::Complexity),
    ];

    let baseline = render_all(&dash, None);
    for hover in &hovers {
        render_all(&dash, Some(hover));
    }
    assert_eq!(render_all(&dash, None), baseline);

    dash.select("THE FAT CAT").unwrap();
    let committed = render_all(&dash, None);
    for hover in &hovers {
        render_all(&dash, Some(hover));
        assert_eq!(render_all(&dash, None), committed);
    }

    // hovering the committed story adds nothing
    let same = HoverTarget::Story("THE FAT CAT".to_string());
    assert_eq!(
        dash.render("spectrum", Some(&same)).unwrap(),
        dash.render("spectrum", None).unwrap()
    );
}
