//! Pipeline orchestration
//!
//! Runs the whole update as one strictly sequential pass: refresh the
//! upstream checkout, resolve the target series to tags, vendor one tree
//! per resolved series, fetch the shared amalgamation once, then print the
//! summary table. Any failure aborts the run; output directories already
//! produced are left behind and rebuilt destructively next time.

use std::collections::BTreeMap;
use std::path::Path;

use console::Style;

use crate::config;
use crate::echo::Echo;
use crate::error::Result;
use crate::fetch;
use crate::git::{self, VcsClient};
use crate::report;
use crate::resolver::{self, ResolvedTag, TargetVersion};
use crate::vendor::TreeVendor;

pub struct Pipeline<'a> {
    client: &'a dyn VcsClient,
    work_dir: &'a Path,
    echo: Echo,
}

impl<'a> Pipeline<'a> {
    pub fn new(client: &'a dyn VcsClient, work_dir: &'a Path, echo: Echo) -> Self {
        Self {
            client,
            work_dir,
            echo,
        }
    }

    /// Run the full pipeline
    pub fn run(&self) -> Result<()> {
        let resolved = self.resolve_targets()?;
        self.vendor_resolved(&resolved)?;

        fetch::fetch_amalgamation(
            &config::SQLITE_RELEASE,
            &self.work_dir.join(config::SQLITE_DIR_NAME),
            self.work_dir,
            self.echo,
        )?;

        print!(
            "{}",
            report::version_table(&resolved, &config::SQLITE_RELEASE)
        );
        println!(
            "{}",
            Style::new()
                .green()
                .apply_to("CPython updated successfully!")
        );
        Ok(())
    }

    /// Refresh the upstream checkout and resolve every target series
    ///
    /// Series without a matching release tag are silently absent from the
    /// result; that is the historical contract, not an error.
    pub fn resolve_targets(&self) -> Result<BTreeMap<TargetVersion, ResolvedTag>> {
        self.client.ensure_local()?;
        let tags = self.client.list_tags()?;
        Ok(resolver::resolve(&config::TARGET_VERSIONS, &tags))
    }

    /// Checkout and vendor one tree per resolved series, ascending
    pub fn vendor_resolved(&self, resolved: &BTreeMap<TargetVersion, ResolvedTag>) -> Result<()> {
        let checkout = git::checkout_dir(self.work_dir);
        for (target, pick) in resolved {
            self.client.checkout(&pick.tag)?;
            self.echo.checkout(&pick.tag);

            let output = self.work_dir.join(config::version_dir_name(*target));
            TreeVendor::new(&checkout, self.work_dir, self.echo).vendor_into(&output)?;
        }
        Ok(())
    }
}
