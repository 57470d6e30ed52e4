mod tests_alias;
mod tests_anomalies;
mod tests_properties;
mod tests_tables;
