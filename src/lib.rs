//! Integration test harness for the liveterm workspace.
