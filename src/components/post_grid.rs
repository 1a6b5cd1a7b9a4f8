//! Square image grid used by search results and the profile page.

use leptos::prelude::*;

use crate::net::types::Post;

#[component]
pub fn PostGrid(posts: Vec<Post>, #[prop(default = 3)] columns: u8) -> impl IntoView {
    let style = format!("grid-template-columns: repeat({columns}, 1fr)");
    view! {
        <div class="post-grid" style=style>
            {posts
                .into_iter()
                .map(|post| {
                    let alt = post.alt_text().to_owned();
                    view! {
                        <div class="post-grid__cell">
                            <img class="post-grid__image" src=post.image_url alt=alt loading="lazy"/>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
