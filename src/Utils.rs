// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! different utility modules used by the integration drivers
/// tiny module to set up logging and save convergence tables into csv/txt files
pub mod logger;
/// tiny module to plot sampled signals and convergence curves
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into task sections
pub mod task_parser;
/// read two-column numeric text files
pub mod data_loader;
