use leptos::prelude::*;

use crate::content::Project;

/// One project entry; the whole card links out to the project.
#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
	let Project {
		pro_title,
		pro_image,
		pro_description,
		pro_link,
		..
	} = project;
	let alt = format!("{pro_title} preview");

	view! {
		<a class="card" href=pro_link target="_blank" rel="noopener">
			<h2 class="card-title">{pro_title}</h2>
			<img class="card-media" height="140" src=pro_image alt=alt />
			<p class="card-description">{pro_description}</p>
		</a>
	}
}
