mod tests_version_gating;
