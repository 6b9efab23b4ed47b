//! `spectre posts …` – list, show, create and delete posts.

use anyhow::Result;
use spectre_core::api::types::{Post, PostStub, PostStubList};
use spectre_core::api::GhostApi;

use super::blocking;
use crate::cli::PostsCommand;

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }
    println!("{:<26} {:<10} {}", "ID", "STATUS", "TITLE");
    for p in posts {
        println!("{:<26} {:<10} {}", p.id, p.status, p.title);
    }
}

pub async fn run_posts(api: GhostApi, auth: String, cmd: &PostsCommand) -> Result<()> {
    match cmd {
        PostsCommand::List { limit } => {
            let limit = *limit;
            let posts = blocking(move || api.get_posts(&auth, "", limit)).await?;
            print_posts(&posts.body.posts);
        }
        PostsCommand::Get { id } => {
            let id = id.clone();
            let posts = blocking(move || api.get_post(&auth, &id)).await?;
            for p in &posts.body.posts {
                println!("# {}  ({}, {})", p.title, p.status, p.slug);
                println!();
                println!("{}", p.markdown.as_deref().unwrap_or(""));
            }
        }
        PostsCommand::Create {
            title,
            markdown,
            publish,
        } => {
            let mut stub = PostStub::draft(title, markdown);
            if *publish {
                stub.status = "published".to_string();
            }
            let created = blocking(move || api.create_post(&auth, &PostStubList::from_stub(stub))).await?;
            print_posts(&created.body.posts);
        }
        PostsCommand::Delete { id } => {
            let id = id.clone();
            let shown = id.clone();
            blocking(move || api.delete_post(&auth, &id)).await?;
            println!("Deleted post {shown}.");
        }
    }
    Ok(())
}
