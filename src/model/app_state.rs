use std::sync::Arc;

use crate::{
    lib::{
        BrowserConfigError, BrowserLinks, Executor, HmacInstance, JobQueue, LinkOut, LinkOutError,
        QueueError,
    },
    model::{Catalog, CatalogError, Config},
};

#[derive(thiserror::Error, Debug)]
pub enum AppStateError {
    #[error("Invalid HMAC secret")]
    Hmac(#[from] hmac::digest::InvalidLength),
    #[error("Catalog couldn't be loaded")]
    Catalog(#[from] CatalogError),
    #[error("Genome browser configuration is invalid")]
    Browser(#[from] BrowserConfigError),
    #[error("Link-out configuration of `{database}` is invalid")]
    LinkOut {
        database: String,
        #[source]
        source: LinkOutError,
    },
    #[error("Job queue couldn't be opened")]
    Queue(#[from] QueueError),
}

/// Shared by every HTTP worker.
pub struct AppState {
    pub admin_token: Option<String>,
    pub allow_subject_upload: bool,
    pub browser_links: Option<BrowserLinks>,
    pub catalog: Catalog,
    pub hmac: HmacInstance,
    pub link_outs: std::collections::HashMap<String, LinkOut>,
    pub max_residues: Option<usize>,
    pub queue: JobQueue,
}

impl AppState {
    /// Builds the state and returns the job dispatcher, which must be spawned
    /// for submitted jobs to run.
    pub fn new(
        config: &Config<'_>,
        catalog: Catalog,
        executor: Arc<dyn Executor>,
    ) -> Result<(Self, crate::lib::Dispatcher), AppStateError> {
        use hmac::digest::KeyInit;

        let browser_links = match (&catalog.browser, config.browser_base_url.as_deref()) {
            (Some(browser_config), _) => Some(BrowserLinks::try_from(browser_config.clone())?),
            (None, Some(base_url)) => Some(BrowserLinks::with_default_folder(base_url)?),
            (None, None) => None,
        };

        match &browser_links {
            Some(links) => log::info!(
                "genome browser links use '{}' (default folder '{}')",
                links.base_url(),
                links.default_folder()
            ),
            None => log::info!("genome browser links are disabled"),
        }

        let mut link_outs = std::collections::HashMap::new();

        for database in &catalog.databases {
            if let Some(link_out_config) = &database.link_out {
                let link_out =
                    LinkOut::try_from(link_out_config).map_err(|source| AppStateError::LinkOut {
                        database: database.name.clone(),
                        source,
                    })?;

                link_outs.insert(database.name.clone(), link_out);
            }
        }

        let (queue, dispatcher) = JobQueue::new(
            &config.work_dir,
            executor,
            config.job_workers,
            config.blast_threads,
        )?;

        Ok((
            Self {
                admin_token: config.admin_token.clone(),
                allow_subject_upload: config.allow_subject_upload,
                browser_links,
                catalog,
                hmac: hmac::Hmac::new_from_slice(config.hmac_secret.as_ref())?,
                link_outs,
                max_residues: config.max_residues,
                queue,
            },
            dispatcher,
        ))
    }

    /// Link-out of a database, databases without one only get record ids.
    pub fn link_out(&self, database: Option<&str>) -> LinkOut {
        database
            .and_then(|name| self.link_outs.get(name))
            .cloned()
            .unwrap_or_default()
    }
}
