//! mdblog CLI - markdown post store

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mdblog::{Blog, Comment, Config, NewPost, Post, PostKey};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(about = "A markdown-file post store for single-author blogs", long_about = None)]
struct Cli {
    /// Database directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    database: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The `(name, day, title)` triple identifying a post
#[derive(Args)]
struct KeyArgs {
    /// Author name
    name: String,
    /// Creation day, YYYY-M-D without zero padding
    day: String,
    /// Exact post title
    title: String,
}

impl From<KeyArgs> for PostKey {
    fn from(args: KeyArgs) -> Self {
        PostKey::new(args.name, args.day, args.title)
    }
}

/// Markdown taken inline or from a file
#[derive(Args)]
struct BodyArgs {
    /// Markdown body
    #[arg(long, conflicts_with = "file")]
    body: Option<String>,

    /// Read the markdown body from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl BodyArgs {
    async fn read(self) -> anyhow::Result<String> {
        match (self.body, self.file) {
            (Some(body), _) => Ok(body),
            (None, Some(path)) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display())),
            (None, None) => anyhow::bail!("provide the body with --body or --file"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog database
    Init,

    #[command(flatten)]
    Post(PostCommand),
}

/// Commands that run against an opened blog
#[derive(Subcommand)]
enum PostCommand {
    /// Write a new post
    New {
        /// Author name
        #[arg(long)]
        name: String,
        /// Post title
        #[arg(long)]
        title: String,
        /// Short excerpt
        #[arg(long, default_value = "")]
        head: String,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// List one page of posts, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show a post rendered to HTML (counts a pageview)
    Show {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Print a post's raw markdown
    Edit {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Replace a post's body
    Update {
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Add a comment to a post
    Comment {
        #[command(flatten)]
        key: KeyArgs,
        /// Commenter name
        #[arg(long = "author")]
        author: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Comment text (markdown)
        #[arg(long)]
        content: String,
    },

    /// Delete a post
    Delete {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// List every post, newest first
    Archive,

    /// List all tags
    Tags,

    /// List posts with a tag
    Tag { tag: String },

    /// Find posts whose title contains a keyword
    Search { keyword: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init_database(&cli.database).await,
        Commands::Post(command) => {
            let blog = Blog::open(&cli.database).await?;
            run(&blog, command, cli.json).await
        }
    }
}

async fn run(blog: &Blog, command: PostCommand, json: bool) -> anyhow::Result<()> {
    let posts = blog.posts();

    match command {
        PostCommand::New {
            name,
            title,
            head,
            tags,
            body,
        } => {
            let new_post = NewPost::new(name, title, body.read().await?)
                .with_head(head)
                .with_tags(tags);
            let post = posts.create(new_post).await?;
            if json {
                print_json(&post)?;
            } else {
                println!("Created '{}' ({})", post.title, post.id);
                println!("  key: {}", post.key());
            }
        }
        PostCommand::List { page } => {
            let page = posts.list_page(page).await?;
            if json {
                print_json(&page)?;
            } else {
                print_summaries(&page.posts);
                println!(
                    "(page {}, {} of {} post(s){}{})",
                    page.page,
                    page.posts.len(),
                    page.total,
                    if page.is_first_page() { ", first" } else { "" },
                    if page.is_last_page() { ", last" } else { "" },
                );
            }
        }
        PostCommand::Show { key } => {
            let post = posts.get_one(&key.into()).await?;
            if json {
                print_json(&post)?;
            } else {
                print_post(&post);
            }
        }
        PostCommand::Edit { key } => {
            let post = posts.get_raw(&key.into()).await?;
            if json {
                print_json(&post)?;
            } else {
                print!("{}", post.post);
            }
        }
        PostCommand::Update { key, body } => {
            posts.update(&key.into(), body.read().await?).await?;
            println!("Post updated.");
        }
        PostCommand::Comment {
            key,
            author,
            email,
            website,
            content,
        } => {
            let mut comment = Comment::new(author, content)
                .with_time(chrono::Local::now().format("%Y-%m-%d %H:%M").to_string());
            comment.email = email;
            comment.website = website;
            posts.append_comment(&key.into(), comment).await?;
            println!("Comment added.");
        }
        PostCommand::Delete { key } => {
            posts.remove(&key.into()).await?;
            println!("Post deleted.");
        }
        PostCommand::Archive => {
            let archive = posts.list_archive().await?;
            if json {
                print_json(&archive)?;
            } else {
                let mut year = None;
                for post in &archive {
                    if year != Some(post.time.year) {
                        year = Some(post.time.year);
                        println!("{}", post.time.year);
                    }
                    println!("  {}  {}", post.time.day, post.title);
                }
            }
        }
        PostCommand::Tags => {
            let tags = posts.list_tags().await?;
            if json {
                print_json(&tags)?;
            } else if tags.is_empty() {
                println!("No tags.");
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }
        PostCommand::Tag { tag } => {
            let found = posts.list_by_tag(&tag).await?;
            if json {
                print_json(&found)?;
            } else {
                print_summaries(&found);
            }
        }
        PostCommand::Search { keyword } => {
            let found = posts.search(&keyword).await?;
            if json {
                print_json(&found)?;
            } else {
                print_summaries(&found);
            }
        }
    }

    Ok(())
}

async fn init_database(path: &Path) -> anyhow::Result<()> {
    println!("Initializing mdblog database at {:?}...", path);

    let config = Config::load(path)?;
    if !Config::path(path).exists() {
        config.save(path)?;
    }
    let blog = Blog::open(path).await?;

    println!("Database initialized successfully!");
    println!();
    println!("Directory structure:");
    println!("  collections/{}/     - Post documents", blog.config.collection);
    println!("  .mdblog/config.yaml - Settings");
    println!();
    println!("Get started:");
    println!("  mdblog new --name alice --title Hello --tag intro --body '**hi**'");
    println!("  mdblog list");

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summaries(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }
    for post in posts {
        println!("--- {} ---", post.title);
        println!("  by {} at {} ({} views)", post.name, post.time.minute, post.pv);
        if !post.tags.is_empty() {
            println!("  tags: {}", post.tags.join(", "));
        }
        println!("  key: {}", post.key());
        println!();
    }
}

fn print_post(post: &Post) {
    println!("{}", post.title);
    println!("by {} at {} ({} views)", post.name, post.time.minute, post.pv);
    if !post.tags.is_empty() {
        println!("tags: {}", post.tags.join(", "));
    }
    println!();
    print!("{}", post.post);
    if !post.comments.is_empty() {
        println!();
        println!("{} comment(s):", post.comments.len());
        for comment in &post.comments {
            println!("- {}:", comment.name);
            print!("{}", comment.content);
        }
    }
}
