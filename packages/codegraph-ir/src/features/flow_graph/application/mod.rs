pub mod build_flow_graphs;
