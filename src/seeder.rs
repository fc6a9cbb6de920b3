// Seeding flow: probe the backend, make sure every catalog category
// exists, then create the menu items under their resolved category ids
// and attach a random local image to each.
//
// Every call is best effort. A failed request prints a status line and
// the loop moves on to the next record; only an unreachable backend or
// an empty category map end the run early.

use crate::api::{id_string, ApiReply, ImageUploaded, MenuBackend, RemoteCategory};
use crate::catalog::{NewCategory, NewMenuItem, CATEGORIES, MENU_ITEMS};
use crate::config::SeedConfig;
use crate::error::ApiError;
use crate::images;
use crate::ui::{Mark, Report};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const HTTP_OK: u16 = 200;
const HTTP_CREATED: u16 = 201;
const HTTP_SERVER_ERROR: u16 = 500;

const ITEM_BODY_PREVIEW: usize = 500;
const UPLOAD_BODY_PREVIEW: usize = 200;

/// Category name to remote id.
pub type CategoryMap = HashMap<String, String>;

/// Counters printed at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_found: usize,
    pub categories_created: usize,
    pub categories_failed: usize,
    pub items_created: usize,
    pub items_failed: usize,
    pub items_skipped: usize,
    pub images_uploaded: usize,
    pub images_failed: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "categories: {} found, {} created, {} failed | items: {} created, {} failed, {} skipped | images: {} uploaded, {} failed",
            self.categories_found,
            self.categories_created,
            self.categories_failed,
            self.items_created,
            self.items_failed,
            self.items_skipped,
            self.images_uploaded,
            self.images_failed,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(SeedSummary),
    /// The startup probe got no HTTP response at all.
    Unreachable,
    /// No category could be found or created, so no item can be placed.
    NoCategories,
}

/// Body of a 201 response. Only the id matters, and it may be absent.
#[derive(Deserialize, Debug)]
struct Created {
    #[serde(default)]
    id: serde_json::Value,
}

pub struct Seeder<B: MenuBackend> {
    backend: B,
    currency: String,
    image_dir: Option<PathBuf>,
    rng: StdRng,
    summary: SeedSummary,
}

impl<B: MenuBackend> Seeder<B> {
    pub fn new(backend: B, config: &SeedConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Seeder {
            backend,
            currency: config.currency.clone(),
            image_dir: config.image_dir.clone(),
            rng,
            summary: SeedSummary::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn summary(&self) -> &SeedSummary {
        &self.summary
    }

    /// Probe, then seed. The binary calls the two halves separately so it
    /// can ask for confirmation in between.
    pub fn run(&mut self, report: &mut dyn Report) -> RunOutcome {
        if !self.probe(report) {
            return RunOutcome::Unreachable;
        }
        self.seed(report)
    }

    /// Returns false when the backend did not answer at all. Any status
    /// code counts as reachable.
    pub fn probe(&mut self, report: &mut dyn Report) -> bool {
        match self.backend.probe() {
            Ok(status) => {
                report.line(Mark::Ok, 0, &format!("API is reachable (Status: {status})"));
                report.blank();
                true
            }
            Err(e) => {
                warn!(target_url = %self.backend.target(), error = %e, "backend unreachable");
                report.line(Mark::Fail, 0, &format!("Cannot reach API: {e}"));
                report.line(
                    Mark::Note,
                    0,
                    "Please ensure the backend is reachable and BACKEND_URL is correct.",
                );
                false
            }
        }
    }

    pub fn seed(&mut self, report: &mut dyn Report) -> RunOutcome {
        let categories = self.ensure_categories(report);
        if categories.is_empty() {
            report.blank();
            report.line(Mark::Fail, 0, "No categories were created. Aborting.");
            return RunOutcome::NoCategories;
        }
        self.seed_menu_items(&categories, report);
        info!(summary = %self.summary, "seeding finished");
        RunOutcome::Completed(self.summary.clone())
    }

    /// Build the name to id map: existing categories first, then create
    /// whatever the catalog has that the backend does not.
    pub fn ensure_categories(&mut self, report: &mut dyn Report) -> CategoryMap {
        report.line(Mark::Note, 0, "Creating categories...");
        let mut categories = CategoryMap::new();
        self.load_existing(&mut categories, report);

        for seed in CATEGORIES {
            if categories.contains_key(seed.name) {
                continue;
            }
            let body = NewCategory::from(seed);
            match self.backend.create_category(&body) {
                Ok(reply) if reply.status == HTTP_CREATED => match created_id(&reply) {
                    Ok(id) => {
                        report.line(
                            Mark::Ok,
                            0,
                            &format!("Created category: {} (ID: {id})", seed.name),
                        );
                        categories.insert(seed.name.to_string(), id);
                        self.summary.categories_created += 1;
                    }
                    Err(e) => {
                        report.line(
                            Mark::Fail,
                            0,
                            &format!("Error creating category {}: {e}", seed.name),
                        );
                        self.summary.categories_failed += 1;
                    }
                },
                // The backend surfaces unique-constraint violations as a 500.
                Ok(reply)
                    if reply.status == HTTP_SERVER_ERROR && reply.body.contains("duplicate key") =>
                {
                    report.line(
                        Mark::Warn,
                        0,
                        &format!("Category {} already exists", seed.name),
                    );
                }
                Ok(reply) => {
                    debug!(name = seed.name, status = reply.status, body = %reply.snippet(ITEM_BODY_PREVIEW), "category rejected");
                    report.line(
                        Mark::Fail,
                        0,
                        &format!("Failed to create category {}: {}", seed.name, reply.status),
                    );
                    self.summary.categories_failed += 1;
                }
                Err(e) => {
                    report.line(
                        Mark::Fail,
                        0,
                        &format!("Error creating category {}: {e}", seed.name),
                    );
                    self.summary.categories_failed += 1;
                }
            }
        }
        categories
    }

    fn load_existing(&mut self, categories: &mut CategoryMap, report: &mut dyn Report) {
        let existing = match self.backend.list_categories() {
            Ok(reply) if reply.status == HTTP_OK => reply.json::<Vec<RemoteCategory>>(),
            Ok(reply) => {
                debug!(status = reply.status, body = %reply.snippet(ITEM_BODY_PREVIEW), "category listing rejected");
                report.line(
                    Mark::Warn,
                    0,
                    &format!("Could not fetch existing categories: HTTP {}", reply.status),
                );
                return;
            }
            Err(e) => Err(e),
        };

        let existing = match existing {
            Ok(existing) => existing,
            Err(e) => {
                report.line(
                    Mark::Warn,
                    0,
                    &format!("Could not fetch existing categories: {e}"),
                );
                return;
            }
        };

        for category in existing {
            let Some(id) = id_string(&category.id) else {
                warn!(name = %category.name, "listed category has no usable id");
                continue;
            };
            if category.name.is_empty() {
                warn!(%id, "listed category has no name");
                continue;
            }
            report.line(
                Mark::Ok,
                0,
                &format!("Found existing category: {} (ID: {id})", category.name),
            );
            categories.insert(category.name, id);
            self.summary.categories_found += 1;
        }
    }

    /// Create every catalog item whose category resolved, uploading a
    /// random image after each successful create.
    pub fn seed_menu_items(&mut self, categories: &CategoryMap, report: &mut dyn Report) {
        report.section("Creating menu items...");

        let candidates = match &self.image_dir {
            Some(dir) => {
                let found = images::list_image_files(dir);
                if found.is_empty() {
                    report.line(
                        Mark::Warn,
                        0,
                        &format!(
                            "No images found in '{}'; items will be created without images.",
                            dir.display()
                        ),
                    );
                }
                found
            }
            None => Vec::new(),
        };
        let uploads_enabled = self.image_dir.is_some();

        for section in MENU_ITEMS {
            let Some(category_id) = categories.get(section.category) else {
                report.line(
                    Mark::Fail,
                    0,
                    &format!("Category {} not found, skipping items", section.category),
                );
                self.summary.items_skipped += section.items.len();
                continue;
            };

            for seed in section.items {
                let body = NewMenuItem::new(category_id, seed, &self.currency);
                let reply = match self.backend.create_menu_item(&body) {
                    Ok(reply) => reply,
                    Err(e) => {
                        report.line(
                            Mark::Fail,
                            0,
                            &format!("Error creating menu item {}: {e}", seed.name),
                        );
                        self.summary.items_failed += 1;
                        continue;
                    }
                };

                if reply.status != HTTP_CREATED {
                    report.line(
                        Mark::Fail,
                        0,
                        &format!("Failed to create menu item {}: {}", seed.name, reply.status),
                    );
                    report.line(
                        Mark::Note,
                        1,
                        &format!("Response: {}", reply.snippet(ITEM_BODY_PREVIEW)),
                    );
                    self.summary.items_failed += 1;
                    continue;
                }

                self.summary.items_created += 1;
                let Some(item_id) = menu_item_id(&reply) else {
                    report.line(
                        Mark::Ok,
                        0,
                        &format!(
                            "Created menu item: {} (ID: unknown) - missing id in response",
                            seed.name
                        ),
                    );
                    continue;
                };
                report.line(
                    Mark::Ok,
                    0,
                    &format!("Created menu item: {} (ID: {item_id})", seed.name),
                );

                if !uploads_enabled {
                    continue;
                }
                match images::choose(&candidates, &mut self.rng) {
                    Some(image) => self.upload_image(&item_id, image, report),
                    None => report.line(
                        Mark::Warn,
                        1,
                        &format!("No image available for {}", seed.name),
                    ),
                }
            }
        }
    }

    fn upload_image(&mut self, item_id: &str, image: &Path, report: &mut dyn Report) {
        let uploaded = self.backend.upload_image(item_id, image).and_then(|reply| {
            if reply.status == HTTP_OK {
                reply.json::<ImageUploaded>().map(Ok)
            } else {
                Ok(Err(reply))
            }
        });

        match uploaded {
            Ok(Ok(done)) => {
                let url = done.image_url.as_deref().unwrap_or("(no url returned)");
                report.line(Mark::Ok, 1, &format!("Uploaded image -> {url}"));
                self.summary.images_uploaded += 1;
            }
            Ok(Err(reply)) => {
                report.line(
                    Mark::Fail,
                    1,
                    &format!(
                        "Image upload failed ({}) for {}: {}",
                        reply.status,
                        image.display(),
                        reply.snippet(UPLOAD_BODY_PREVIEW)
                    ),
                );
                self.summary.images_failed += 1;
            }
            Err(e) => {
                report.line(
                    Mark::Fail,
                    1,
                    &format!("Error uploading image {}: {e}", image.display()),
                );
                self.summary.images_failed += 1;
            }
        }
    }
}

fn created_id(reply: &ApiReply) -> Result<String, ApiError> {
    let created: Created = reply.json()?;
    id_string(&created.id).ok_or(ApiError::MissingId)
}

/// The menu item endpoint may answer 201 without an id in the body; the
/// `Location` header still names the new resource.
fn menu_item_id(reply: &ApiReply) -> Option<String> {
    reply
        .json::<Created>()
        .ok()
        .and_then(|created| id_string(&created.id))
        .or_else(|| reply.location_id())
}
